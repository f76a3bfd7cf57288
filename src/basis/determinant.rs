//! Occupation-number representation of Slater determinants.

use std::fmt;

use bitvec::prelude::*;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::ShellModelError;

/// The maximum number of orbitals an occupation bitmask can describe.
pub const MAX_ORBITALS: usize = u64::BITS as usize;

/// A Slater determinant in the occupation-number representation: bit $`i`$ is set if and only if
/// orbital $`i`$ is occupied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Determinant {
    occupations: u64,
}

impl Determinant {
    /// Returns the determinant with no occupied orbitals.
    pub fn vacuum() -> Self {
        Self::default()
    }

    /// Constructs a determinant from its raw occupation bitmask.
    pub fn from_bits(occupations: u64) -> Self {
        Self { occupations }
    }

    /// Constructs a determinant in which exactly the given orbitals are occupied.
    ///
    /// # Errors
    ///
    /// Errors if an orbital index does not fit in the occupation bitmask.
    pub fn from_occupied(indices: &[usize]) -> Result<Self, ShellModelError> {
        indices.iter().try_fold(Self::vacuum(), |det, &idx| {
            if idx >= MAX_ORBITALS {
                Err(ShellModelError::InvalidConfiguration(format!(
                    "orbital index {idx} does not fit in a {MAX_ORBITALS}-bit occupation mask"
                )))
            } else {
                Ok(det.with_occupation(idx, true))
            }
        })
    }

    /// Returns the raw occupation bitmask.
    pub fn bits(&self) -> u64 {
        self.occupations
    }

    fn view(&self) -> &BitSlice<u64, Lsb0> {
        self.occupations.view_bits::<Lsb0>()
    }

    /// Returns `true` if orbital `idx` is occupied. Indices beyond the bitmask width are never
    /// occupied.
    pub fn is_occupied(&self, idx: usize) -> bool {
        self.view().get(idx).map(|bit| *bit).unwrap_or(false)
    }

    /// Returns the number of occupied orbitals.
    pub fn n_occupied(&self) -> usize {
        self.view().count_ones()
    }

    /// Returns the number of occupied orbitals with an index strictly below `idx`.
    pub fn n_occupied_below(&self, idx: usize) -> usize {
        self.view()[..idx.min(MAX_ORBITALS)].count_ones()
    }

    /// Returns the indices of the occupied orbitals in ascending order.
    pub fn occupied_orbitals(&self) -> Vec<usize> {
        self.view().iter_ones().collect()
    }

    /// Returns a copy of this determinant with the occupation of orbital `idx` set to `occupied`.
    pub(crate) fn with_occupation(&self, idx: usize, occupied: bool) -> Self {
        let mut occupations = self.occupations;
        occupations.view_bits_mut::<Lsb0>().set(idx, occupied);
        Self { occupations }
    }

    /// Formats the occupations of the first `n_states` orbitals as a string of `0`s and `1`s,
    /// orbital $`0`$ first.
    pub fn occupation_string(&self, n_states: usize) -> String {
        self.view()[..n_states.min(MAX_ORBITALS)]
            .iter()
            .map(|bit| if *bit { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for Determinant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "|{}⟩",
            self.occupied_orbitals()
                .iter()
                .map(|i| i.to_string())
                .join(" ")
        )
    }
}
