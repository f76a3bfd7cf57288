//! Many-body matrices of one-body operators, expectation values and transition strengths.

use ndarray::{Array2, ArrayView1, ArrayView2, Zip};

use crate::basis::{Determinant, SlaterBasis};
use crate::error::ShellModelError;
use crate::linalg::{self, Matrix};
use crate::operators::OneBodyOperator;
use crate::second_quantisation::apply_one_body;


/// Builds the many-body matrix of the one-body operator
/// $`\hat{O} = \sum_{ab} o_{ab} \hat{a}^{\dagger}_a \hat{a}_b`$ in a determinant basis.
///
/// Every element $`O_{ij} = \braket{i | \hat{O} | j}`$ is evaluated independently, so operators
/// that are not Hermitian produce non-symmetric matrices.
pub fn build_one_body_matrix(basis: &SlaterBasis, operator: &OneBodyOperator) -> Matrix {
    let dets = basis.determinants();
    let dim = basis.dimension();
    let mut omat = Array2::<f64>::zeros((dim, dim));
    Zip::indexed(&mut omat).par_for_each(|(i, j), elem| {
        *elem = one_body_element(&dets[i], &dets[j], operator);
    });
    log::debug!("Many-body one-body-operator matrix:\n  {omat:+.8e}");
    omat
}

/// Calculates $`\braket{bra | \sum_{ab} o_{ab} \hat{a}^{\dagger}_a \hat{a}_b | ket}`$.
fn one_body_element(bra: &Determinant, ket: &Determinant, operator: &OneBodyOperator) -> f64 {
    operator
        .iter()
        .filter_map(|((a, b), o)| {
            apply_one_body(ket, a, b)
                .filter(|(det, _)| det == bra)
                .map(|(_, phase)| o * phase)
        })
        .sum()
}

/// Calculates the toy transition strength $`|\braket{f | \hat{O} | i}|^2`$.
///
/// No angular-momentum reduction factor is applied.
///
/// # Arguments
///
/// * `initial_state` - The coefficient vector of $`\ket{i}`$.
/// * `final_state` - The coefficient vector of $`\ket{f}`$.
/// * `operator_matrix` - The many-body matrix of $`\hat{O}`$.
///
/// # Errors
///
/// Errors with [`ShellModelError::DimensionMismatch`] if the shapes are incompatible.
pub fn transition_strength(
    initial_state: &ArrayView1<f64>,
    final_state: &ArrayView1<f64>,
    operator_matrix: &ArrayView2<f64>,
) -> Result<f64, ShellModelError> {
    let op_initial = linalg::mat_vec(operator_matrix, initial_state)?;
    let amplitude = linalg::dot(final_state, &op_initial.view())?;
    Ok(amplitude * amplitude)
}

/// Calculates the expectation value $`\braket{\psi | \hat{O} | \psi}`$.
///
/// The state is not normalised here.
///
/// # Errors
///
/// Errors with [`ShellModelError::DimensionMismatch`] if the shapes are incompatible.
pub fn expectation_value(
    state: &ArrayView1<f64>,
    operator_matrix: &ArrayView2<f64>,
) -> Result<f64, ShellModelError> {
    let op_state = linalg::mat_vec(operator_matrix, state)?;
    linalg::dot(state, &op_state.view())
}
