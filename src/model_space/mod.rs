//! Single-particle orbitals and the ordered model space they make up.

use std::fmt;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::basis::determinant::MAX_ORBITALS;
use crate::error::ShellModelError;
use crate::linalg::Vector;


// ==================
// Struct definitions
// ==================

/// A structure describing a single-particle orbital by its quantum numbers and energy.
///
/// Angular momenta are stored doubled so that half-integer values stay integral.
#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Orbital {
    /// A human-readable label, *e.g.* `p3/2,m=-3/2`.
    #[builder(setter(into), default = "String::new()")]
    #[serde(default)]
    pub label: String,

    /// The principal (radial) quantum number.
    #[builder(default = "0")]
    #[serde(default)]
    pub n: i32,

    /// The orbital angular momentum.
    #[builder(default = "0")]
    #[serde(default)]
    pub l: i32,

    /// Twice the total angular momentum $`j`$.
    #[builder(default = "0")]
    #[serde(default)]
    pub two_j: i32,

    /// Twice the angular-momentum projection $`m`$.
    #[builder(default = "0")]
    #[serde(default)]
    pub two_m: i32,

    /// The isospin projection.
    #[builder(default = "0")]
    #[serde(default)]
    pub isospin_z: i32,

    /// The single-particle energy.
    #[builder(default = "0.0")]
    #[serde(default)]
    pub energy: f64,
}

impl Orbital {
    /// Returns a builder to construct a new [`Orbital`].
    pub fn builder() -> OrbitalBuilder {
        OrbitalBuilder::default()
    }

    /// Constructs an orbital from all of its quantum numbers and its energy.
    pub fn new(
        label: &str,
        n: i32,
        l: i32,
        two_j: i32,
        two_m: i32,
        isospin_z: i32,
        energy: f64,
    ) -> Self {
        Self {
            label: label.to_string(),
            n,
            l,
            two_j,
            two_m,
            isospin_z,
            energy,
        }
    }
}

/// An append-only, ordered collection of orbitals. The position of an orbital in this collection
/// is the orbital index used by every other component.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSpace {
    orbitals: Vec<Orbital>,
}

impl ModelSpace {
    /// Creates an empty model space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model space from a sequence of orbitals, indexed in iteration order.
    ///
    /// # Errors
    ///
    /// Errors if more orbitals are given than an occupation bitmask can hold.
    pub fn from_orbitals<I>(orbitals: I) -> Result<Self, ShellModelError>
    where
        I: IntoIterator<Item = Orbital>,
    {
        let mut space = Self::new();
        orbitals
            .into_iter()
            .try_for_each(|orbital| space.add_orbital(orbital))?;
        Ok(space)
    }

    /// Appends an orbital. Its index is the previous size of the model space.
    ///
    /// # Errors
    ///
    /// Errors with [`ShellModelError::InvalidConfiguration`] if the model space is already as large
    /// as the occupation-bitmask width.
    pub fn add_orbital(&mut self, orbital: Orbital) -> Result<(), ShellModelError> {
        if self.orbitals.len() >= MAX_ORBITALS {
            return Err(ShellModelError::InvalidConfiguration(format!(
                "a model space can hold at most {MAX_ORBITALS} orbitals"
            )));
        }
        log::debug!(
            "Orbital {} added to the model space: {:?}",
            self.orbitals.len(),
            orbital
        );
        self.orbitals.push(orbital);
        Ok(())
    }

    /// Returns the orbitals in index order.
    pub fn orbitals(&self) -> &[Orbital] {
        &self.orbitals
    }

    /// Returns the orbital at `idx`, if any.
    pub fn orbital(&self, idx: usize) -> Option<&Orbital> {
        self.orbitals.get(idx)
    }

    /// Returns the number of orbitals.
    pub fn size(&self) -> usize {
        self.orbitals.len()
    }

    /// Returns `true` if no orbital has been added yet.
    pub fn is_empty(&self) -> bool {
        self.orbitals.is_empty()
    }

    /// Returns the single-particle energies in index order.
    pub fn energies(&self) -> Vector {
        self.orbitals.iter().map(|orbital| orbital.energy).collect()
    }
}

impl fmt::Display for ModelSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_length = self
            .orbitals
            .iter()
            .map(|orbital| orbital.label.chars().count())
            .max()
            .unwrap_or(0)
            .max(5);
        let width = label_length + 48;
        writeln!(f, "{}", "┈".repeat(width))?;
        writeln!(
            f,
            "{:>3}  {:<label_length$} {:>3} {:>3} {:>4} {:>4} {:>4} {:>16}",
            "#", "Label", "n", "l", "2j", "2m", "tz", "Energy"
        )?;
        writeln!(f, "{}", "┈".repeat(width))?;
        for (i, orbital) in self.orbitals.iter().enumerate() {
            writeln!(
                f,
                "{:>3}  {:<label_length$} {:>3} {:>3} {:>+4} {:>+4} {:>+4} {:>+16.8}",
                i,
                orbital.label,
                orbital.n,
                orbital.l,
                orbital.two_j,
                orbital.two_m,
                orbital.isospin_z,
                orbital.energy,
            )?;
        }
        writeln!(f, "{}", "┈".repeat(width))?;
        Ok(())
    }
}
