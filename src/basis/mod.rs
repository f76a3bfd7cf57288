//! Fock-space bases of Slater determinants with a fixed particle number.

use std::collections::HashMap;

use crate::error::ShellModelError;
use crate::model_space::ModelSpace;

pub mod determinant;

pub use determinant::{Determinant, MAX_ORBITALS};

#[cfg(test)]
#[path = "basis_tests.rs"]
mod basis_tests;

/// A structure managing the ordered set of all Slater determinants with a fixed number of
/// particles distributed over a fixed number of orbitals.
///
/// The determinants are enumerated once at construction, in lexicographic order of their
/// occupied-orbital index lists. This order is deterministic but is not the numerical order of the
/// raw bitmasks.
#[derive(Clone, Debug)]
pub struct SlaterBasis {
    /// The number of particles in every determinant.
    n_particles: usize,

    /// The number of single-particle orbitals.
    n_states: usize,

    /// The determinants in basis order.
    determinants: Vec<Determinant>,

    /// Reverse lookup from a determinant to its position in [`Self::determinants`].
    index_map: HashMap<Determinant, usize>,
}

impl SlaterBasis {
    /// Generates the basis of all `n_particles`-particle determinants over `n_states` orbitals.
    ///
    /// # Errors
    ///
    /// Errors with [`ShellModelError::InvalidConfiguration`] if `n_states` exceeds
    /// [`MAX_ORBITALS`] or `n_particles` exceeds `n_states`.
    pub fn new(n_particles: usize, n_states: usize) -> Result<Self, ShellModelError> {
        if n_states > MAX_ORBITALS {
            return Err(ShellModelError::InvalidConfiguration(format!(
                "{n_states} single-particle states requested, but at most {MAX_ORBITALS} fit in an occupation mask"
            )));
        }
        if n_particles > n_states {
            return Err(ShellModelError::InvalidConfiguration(format!(
                "cannot place {n_particles} particle(s) in {n_states} single-particle state(s)"
            )));
        }

        let mut determinants =
            Vec::with_capacity(binomial(n_states, n_particles).unwrap_or_default());
        choose_states(
            0,
            n_particles,
            n_states,
            Determinant::vacuum(),
            &mut determinants,
        );
        let index_map = determinants
            .iter()
            .enumerate()
            .map(|(i, det)| (*det, i))
            .collect::<HashMap<_, _>>();
        log::debug!(
            "Generated {} determinant(s) for {n_particles} particle(s) in {n_states} state(s).",
            determinants.len()
        );

        Ok(Self {
            n_particles,
            n_states,
            determinants,
            index_map,
        })
    }

    /// Generates the basis of all `n_particles`-particle determinants over the orbitals of a model
    /// space.
    pub fn from_model_space(
        n_particles: usize,
        model_space: &ModelSpace,
    ) -> Result<Self, ShellModelError> {
        Self::new(n_particles, model_space.size())
    }

    /// Returns the number of particles.
    pub fn n_particles(&self) -> usize {
        self.n_particles
    }

    /// Returns the number of single-particle states.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Returns the determinants in basis order.
    pub fn determinants(&self) -> &[Determinant] {
        &self.determinants
    }

    /// Returns the determinant at position `idx`.
    pub fn determinant(&self, idx: usize) -> Option<&Determinant> {
        self.determinants.get(idx)
    }

    /// Returns the dimension of the basis.
    pub fn dimension(&self) -> usize {
        self.determinants.len()
    }

    /// Returns the position of `det` in the basis, or `None` if it is not a member.
    pub fn index_of(&self, det: &Determinant) -> Option<usize> {
        self.index_map.get(det).copied()
    }
}

/// Recursively appends every determinant obtained by occupying `remaining` further orbitals with
/// indices in `start..n_states` on top of `det`.
fn choose_states(
    start: usize,
    remaining: usize,
    n_states: usize,
    det: Determinant,
    out: &mut Vec<Determinant>,
) {
    if remaining == 0 {
        out.push(det);
        return;
    }
    for i in start..=(n_states - remaining) {
        choose_states(
            i + 1,
            remaining - 1,
            n_states,
            det.with_occupation(i, true),
            out,
        );
    }
}

/// Calculates the binomial coefficient $`\binom{n}{k}`$, or `None` on overflow.
pub fn binomial(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    (0..k).try_fold(1usize, |acc, i| {
        acc.checked_mul(n - i).map(|v| v / (i + 1))
    })
}
