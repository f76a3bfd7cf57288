//! Fermionic creation and annihilation on occupation-number determinants.
//!
//! The phase of an operator application is $`(-1)^k`$, where $`k`$ is the number of occupied
//! orbitals with an index lower than the one acted upon. Phases of successive applications
//! multiply in application order, which reproduces the fermionic anticommutation relations
//! without any explicit permutation bookkeeping. Every many-body matrix element in this crate is
//! evaluated through the functions here so that a single phase convention is in force.

use crate::basis::determinant::{Determinant, MAX_ORBITALS};

#[cfg(test)]
#[path = "second_quantisation_tests.rs"]
mod second_quantisation_tests;

/// Returns the phase $`(-1)^k`$ with $`k`$ the number of orbitals below `idx` occupied in `det`.
fn parity_below(det: &Determinant, idx: usize) -> f64 {
    if det.n_occupied_below(idx) % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Applies $`\hat{a}_{idx}`$ to `det`.
///
/// # Returns
///
/// The resulting determinant and its phase, or `None` if orbital `idx` is not occupied, in which
/// case the operator annihilates the state.
pub fn annihilate(det: &Determinant, idx: usize) -> Option<(Determinant, f64)> {
    if !det.is_occupied(idx) {
        return None;
    }
    Some((det.with_occupation(idx, false), parity_below(det, idx)))
}

/// Applies $`\hat{a}^{\dagger}_{idx}`$ to `det`.
///
/// # Returns
///
/// The resulting determinant and its phase, or `None` if orbital `idx` is already occupied (Pauli
/// exclusion) or lies beyond the occupation-bitmask width.
pub fn create(det: &Determinant, idx: usize) -> Option<(Determinant, f64)> {
    if idx >= MAX_ORBITALS || det.is_occupied(idx) {
        return None;
    }
    Some((det.with_occupation(idx, true), parity_below(det, idx)))
}

/// Applies the one-body string $`\hat{a}^{\dagger}_a \hat{a}_b`$ to `ket`, annihilating first.
///
/// # Returns
///
/// The resulting determinant and the product of the two phases, or `None` if either step
/// annihilates the state.
pub fn apply_one_body(ket: &Determinant, a: usize, b: usize) -> Option<(Determinant, f64)> {
    let (det_b, phase_b) = annihilate(ket, b)?;
    let (det_a, phase_a) = create(&det_b, a)?;
    Some((det_a, phase_b * phase_a))
}

/// Applies the two-body string
/// $`\hat{a}^{\dagger}_a \hat{a}^{\dagger}_b \hat{a}_c \hat{a}_d`$ to `ket`, in the order
/// $`\hat{a}_d`$, $`\hat{a}_c`$, $`\hat{a}^{\dagger}_b`$, $`\hat{a}^{\dagger}_a`$.
///
/// # Returns
///
/// The resulting determinant and the product of the four phases, or `None` if any step
/// annihilates the state.
pub fn apply_two_body(
    ket: &Determinant,
    a: usize,
    b: usize,
    c: usize,
    d: usize,
) -> Option<(Determinant, f64)> {
    let (det_d, phase_d) = annihilate(ket, d)?;
    let (det_c, phase_c) = annihilate(&det_d, c)?;
    let (det_b, phase_b) = create(&det_c, b)?;
    let (det_a, phase_a) = create(&det_b, a)?;
    Some((det_a, phase_d * phase_c * phase_b * phase_a))
}
