//! Dense linear-algebra primitives on top of [`ndarray`].
//!
//! The shell-model core works exclusively with real, dense matrices and vectors. The functions in
//! this module are thin, shape-checked wrappers so that mismatches surface as
//! [`ShellModelError::DimensionMismatch`] rather than as panics inside `ndarray`.

use itertools::Itertools;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::ShellModelError;


/// Dense real matrix.
pub type Matrix = Array2<f64>;

/// Dense real vector.
pub type Vector = Array1<f64>;

/// Returns the $`n \times n`$ identity matrix.
pub fn identity(n: usize) -> Matrix {
    Array2::eye(n)
}

/// Calculates the Euclidean inner product of two vectors.
///
/// # Errors
///
/// Errors with [`ShellModelError::DimensionMismatch`] if the vectors differ in length.
pub fn dot(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> Result<f64, ShellModelError> {
    if a.len() != b.len() {
        return Err(ShellModelError::DimensionMismatch(format!(
            "dot product of vectors of lengths {} and {}",
            a.len(),
            b.len()
        )));
    }
    Ok(a.dot(b))
}

/// Calculates the matrix-vector product $`\mathbf{M}\mathbf{v}`$.
///
/// # Errors
///
/// Errors with [`ShellModelError::DimensionMismatch`] if the number of columns of `m` differs
/// from the length of `v`.
pub fn mat_vec(m: &ArrayView2<f64>, v: &ArrayView1<f64>) -> Result<Vector, ShellModelError> {
    if m.ncols() != v.len() {
        return Err(ShellModelError::DimensionMismatch(format!(
            "matrix-vector product of a ({}, {}) matrix with a vector of length {}",
            m.nrows(),
            m.ncols(),
            v.len()
        )));
    }
    Ok(m.dot(v))
}

/// Extracts column `c` of `m` as an owned vector.
///
/// # Errors
///
/// Errors with [`ShellModelError::DimensionMismatch`] if `c` is out of range.
pub fn column(m: &ArrayView2<f64>, c: usize) -> Result<Vector, ShellModelError> {
    if c >= m.ncols() {
        return Err(ShellModelError::DimensionMismatch(format!(
            "column {c} requested from a matrix with {} column(s)",
            m.ncols()
        )));
    }
    Ok(m.column(c).to_owned())
}

/// Sorts eigenvalues in ascending order and permutes the eigenvector columns identically.
///
/// The sort is stable, so degenerate eigenvalues keep their relative order.
///
/// # Arguments
///
/// * `eigvals` - The unsorted eigenvalues.
/// * `eigvecs` - The eigenvectors, one per column, in the same order as `eigvals`.
///
/// # Returns
///
/// The sorted eigenvalues and the correspondingly permuted eigenvectors.
pub fn sort_eigensystem(
    eigvals: &ArrayView1<f64>,
    eigvecs: &ArrayView2<f64>,
) -> Result<(Vector, Matrix), ShellModelError> {
    if eigvals.len() != eigvecs.ncols() {
        return Err(ShellModelError::DimensionMismatch(format!(
            "{} eigenvalue(s) but {} eigenvector column(s)",
            eigvals.len(),
            eigvecs.ncols()
        )));
    }
    let indices = (0..eigvals.len())
        .sorted_by(|&i, &j| eigvals[i].total_cmp(&eigvals[j]))
        .collect_vec();
    let eigvals_sorted = eigvals.select(Axis(0), &indices);
    let eigvecs_sorted = eigvecs.select(Axis(1), &indices);
    Ok((eigvals_sorted, eigvecs_sorted))
}

/// Returns the largest absolute deviation $`\max_{ij} |M_{ij} - M_{ji}|`$ of a square matrix from
/// symmetry.
pub fn max_asymmetry(m: &ArrayView2<f64>) -> f64 {
    (m - &m.t())
        .iter()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()))
}
