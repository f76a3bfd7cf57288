//! Assembly of the many-body Hamiltonian matrix in a Slater-determinant basis.

use ndarray::Array2;
use rayon::prelude::*;

use crate::basis::{Determinant, SlaterBasis};
use crate::error::ShellModelError;
use crate::linalg::Matrix;
use crate::model_space::ModelSpace;
use crate::operators::TwoBodyOperator;
use crate::second_quantisation::{apply_one_body, apply_two_body};


/// Builder for the dense many-body Hamiltonian
/// ```math
///     \hat{H} = \sum_p \varepsilon_p \hat{a}^{\dagger}_p \hat{a}_p
///         + \frac{1}{4} \sum_{abcd} v_{abcd}
///           \hat{a}^{\dagger}_a \hat{a}^{\dagger}_b \hat{a}_c \hat{a}_d,
/// ```
/// where $`\varepsilon_p`$ are the single-particle energies of the model space and
/// $`v_{abcd}`$ the coefficients of a [`TwoBodyOperator`].
///
/// The factor of $`\frac{1}{4}`$ assumes that the two-body coefficients are supplied in the
/// unrestricted double-sum convention, *i.e.* with every nonzero index permutation present.
pub struct HamiltonianBuilder;

impl HamiltonianBuilder {
    /// Builds the Hamiltonian matrix $`H_{ij} = \braket{i | \hat{H} | j}`$.
    ///
    /// Only the upper triangle $`i \le j`$ is evaluated; each value is mirrored into
    /// $`H_{ji}`$, so the result is exactly symmetric.
    ///
    /// # Arguments
    ///
    /// * `model_space` - The model space supplying the single-particle energies.
    /// * `basis` - The determinant basis, generated over the orbitals of `model_space`.
    /// * `interaction` - The two-body interaction coefficients.
    ///
    /// # Errors
    ///
    /// Errors with [`ShellModelError::InvalidConfiguration`] if `basis` was not generated for the
    /// number of orbitals in `model_space`.
    pub fn build(
        model_space: &ModelSpace,
        basis: &SlaterBasis,
        interaction: &TwoBodyOperator,
    ) -> Result<Matrix, ShellModelError> {
        if basis.n_states() != model_space.size() {
            return Err(ShellModelError::InvalidConfiguration(format!(
                "basis spans {} state(s) but the model space has {} orbital(s)",
                basis.n_states(),
                model_space.size()
            )));
        }
        if let Some(max_index) = interaction.max_index() {
            if max_index >= basis.n_states() {
                log::warn!(
                    "Two-body coefficients reference orbital {max_index}, which lies outside the {}-orbital model space; such terms never contribute.",
                    basis.n_states()
                );
            }
        }

        let energies = model_space.energies().to_vec();
        let dets = basis.determinants();
        let dim = basis.dimension();

        let upper_rows = (0..dim)
            .into_par_iter()
            .map(|i| {
                (i..dim)
                    .map(|j| {
                        one_body_element(&dets[i], &dets[j], &energies)
                            + two_body_element(&dets[i], &dets[j], interaction)
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let mut hmat = Array2::<f64>::zeros((dim, dim));
        for (i, row) in upper_rows.into_iter().enumerate() {
            for (offset, value) in row.into_iter().enumerate() {
                let j = i + offset;
                hmat[(i, j)] = value;
                hmat[(j, i)] = value;
            }
        }
        log::debug!("Many-body Hamiltonian matrix:\n  {hmat:+.8e}");
        Ok(hmat)
    }
}

/// Calculates $`\braket{bra | \sum_p \varepsilon_p \hat{a}^{\dagger}_p \hat{a}_p | ket}`$.
fn one_body_element(bra: &Determinant, ket: &Determinant, energies: &[f64]) -> f64 {
    energies
        .iter()
        .enumerate()
        .filter_map(|(p, energy)| {
            apply_one_body(ket, p, p)
                .filter(|(det, _)| det == bra)
                .map(|(_, phase)| energy * phase)
        })
        .sum()
}

/// Calculates
/// $`\braket{bra | \frac{1}{4} \sum_{abcd} v_{abcd}
///   \hat{a}^{\dagger}_a \hat{a}^{\dagger}_b \hat{a}_c \hat{a}_d | ket}`$
/// by visiting only the stored nonzero coefficients.
fn two_body_element(bra: &Determinant, ket: &Determinant, interaction: &TwoBodyOperator) -> f64 {
    interaction
        .iter()
        .filter_map(|((a, b, c, d), v)| {
            apply_two_body(ket, a, b, c, d)
                .filter(|(det, _)| det == bra)
                .map(|(_, phase)| 0.25 * v * phase)
        })
        .sum()
}
