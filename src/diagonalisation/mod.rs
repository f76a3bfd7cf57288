//! Dense symmetric eigensolver based on cyclic Jacobi rotations.

use std::fmt;

use derive_builder::Builder;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::ShellModelError;
use crate::linalg::{self, identity, max_asymmetry, Matrix, Vector};


// ==================
// Struct definitions
// ==================

/// A structure containing control parameters for Jacobi diagonalisation.
#[derive(Clone, Builder, Debug, PartialEq, Serialize, Deserialize)]
pub struct JacobiParams {
    /// The maximum number of Jacobi rotations. Each rotation eliminates one off-diagonal pair.
    #[builder(default = "100")]
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// The convergence threshold on the largest absolute off-diagonal element.
    #[builder(default = "1e-12")]
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_max_iterations() -> usize {
    100
}

fn default_tolerance() -> f64 {
    1e-12
}

impl JacobiParams {
    /// Returns a builder to construct a [`JacobiParams`] structure.
    pub fn builder() -> JacobiParamsBuilder {
        JacobiParamsBuilder::default()
    }
}

impl Default for JacobiParams {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
        }
    }
}

impl fmt::Display for JacobiParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Maximum Jacobi rotations: {}", self.max_iterations)?;
        writeln!(f, "Off-diagonal tolerance: {:.3e}", self.tolerance)?;
        Ok(())
    }
}

/// Structure containing the sorted eigenvalues and eigenvectors of a real symmetric matrix.
#[derive(Clone, Debug)]
pub struct EigenSystem {
    /// The eigenvalues in ascending order.
    eigenvalues: Vector,

    /// The eigenvectors, column $`k`$ belonging to eigenvalue $`k`$.
    eigenvectors: Matrix,

    /// The number of Jacobi rotations performed.
    iterations: usize,

    /// The largest absolute off-diagonal element left when the rotations stopped.
    max_offdiag: f64,

    /// Whether [`Self::max_offdiag`] fell below the requested tolerance.
    converged: bool,
}

impl EigenSystem {
    /// Returns the eigenvalues in ascending order.
    pub fn eigenvalues(&self) -> &Vector {
        &self.eigenvalues
    }

    /// Returns the eigenvectors as columns.
    pub fn eigenvectors(&self) -> &Matrix {
        &self.eigenvectors
    }

    /// Returns the eigenvector belonging to the `k`-th lowest eigenvalue.
    pub fn eigenvector(&self, k: usize) -> Result<Vector, ShellModelError> {
        linalg::column(&self.eigenvectors.view(), k)
    }

    /// Returns the number of Jacobi rotations performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the largest absolute off-diagonal element left when the rotations stopped.
    pub fn max_offdiag(&self) -> f64 {
        self.max_offdiag
    }

    /// Returns `true` if the rotations stopped because the tolerance was met rather than because
    /// the iteration cap was reached.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Turns a best-effort, unconverged result into an error.
    ///
    /// # Errors
    ///
    /// Errors with [`ShellModelError::NotConverged`] if the iteration cap was hit.
    pub fn ensure_converged(&self) -> Result<&Self, ShellModelError> {
        if self.converged {
            Ok(self)
        } else {
            Err(ShellModelError::NotConverged {
                iterations: self.iterations,
                max_offdiag: self.max_offdiag,
            })
        }
    }
}

// =================
// Trait definitions
// =================

/// Trait to diagonalise a real symmetric matrix $`\mathbf{A}`$ by cyclic Jacobi rotations,
/// yielding $`\mathbf{A} = \mathbf{V} \mathbf{\Lambda} \mathbf{V}^{\mathsf{T}}`$ with
/// $`\mathbf{V}`$ orthogonal.
pub trait JacobiDiagonalisable {
    /// Diagonalises the matrix.
    ///
    /// Each iteration locates the largest-magnitude off-diagonal element $`A_{pq}`$ and applies
    /// the plane rotation that zeroes it exactly. Iterations stop once that element is below
    /// `params.tolerance` or after `params.max_iterations` rotations. Hitting the cap is not an
    /// error: the diagonal of the partially rotated matrix is returned as the best available
    /// estimate and the result is flagged as unconverged.
    ///
    /// Only the symmetric part of the matrix is meaningful; no symmetrisation is performed.
    ///
    /// # Errors
    ///
    /// Errors with [`ShellModelError::NonSquareMatrix`] if the matrix is not square.
    fn diagonalise_jacobi(&self, params: &JacobiParams) -> Result<EigenSystem, ShellModelError>;
}

impl JacobiDiagonalisable for ArrayView2<'_, f64> {
    fn diagonalise_jacobi(&self, params: &JacobiParams) -> Result<EigenSystem, ShellModelError> {
        let (nrows, ncols) = self.dim();
        if nrows != ncols {
            return Err(ShellModelError::NonSquareMatrix { nrows, ncols });
        }
        let n = nrows;
        let asymmetry = max_asymmetry(self);
        if asymmetry > 0.0 {
            log::debug!("Jacobi input deviates from symmetry by up to {asymmetry:.3e}.");
        }

        let mut amat = self.to_owned();
        let mut vmat = identity(n);
        let mut iterations = 0;
        let (converged, max_offdiag) = loop {
            let (p, q, max_offdiag) = find_max_offdiag(&amat);
            if max_offdiag < params.tolerance || max_offdiag == 0.0 {
                break (true, max_offdiag);
            }
            if iterations >= params.max_iterations {
                break (false, max_offdiag);
            }
            rotate(&mut amat, &mut vmat, p, q);
            iterations += 1;
        };

        if converged {
            log::debug!(
                "Jacobi diagonalisation of a {n}×{n} matrix converged after {iterations} rotation(s)."
            );
        } else {
            log::warn!(
                "Jacobi diagonalisation of a {n}×{n} matrix stopped after {iterations} rotation(s) with a largest off-diagonal element of {max_offdiag:.3e} > {:.3e}; returning the best available estimate.",
                params.tolerance
            );
        }

        let (eigenvalues, eigenvectors) =
            linalg::sort_eigensystem(&amat.diag(), &vmat.view())?;
        log::debug!("Jacobi eigenvalues:\n  {eigenvalues:+.8e}");
        Ok(EigenSystem {
            eigenvalues,
            eigenvectors,
            iterations,
            max_offdiag,
            converged,
        })
    }
}

impl JacobiDiagonalisable for Array2<f64> {
    fn diagonalise_jacobi(&self, params: &JacobiParams) -> Result<EigenSystem, ShellModelError> {
        self.view().diagonalise_jacobi(params)
    }
}

// =========
// Functions
// =========

/// Diagonalises a real symmetric matrix by cyclic Jacobi rotations.
///
/// # Arguments
///
/// * `matrix` - The matrix to diagonalise.
/// * `max_iterations` - The maximum number of rotations.
/// * `tolerance` - The convergence threshold on the largest absolute off-diagonal element.
///
/// # Returns
///
/// The ascending eigenvalues with their eigenvectors.
pub fn diagonalise(
    matrix: &Matrix,
    max_iterations: usize,
    tolerance: f64,
) -> Result<EigenSystem, ShellModelError> {
    matrix.diagonalise_jacobi(&JacobiParams {
        max_iterations,
        tolerance,
    })
}

/// Diagonalises a real symmetric matrix with the default [`JacobiParams`] (100 rotations,
/// tolerance $`10^{-12}`$).
pub fn diagonalise_default(matrix: &Matrix) -> Result<EigenSystem, ShellModelError> {
    matrix.diagonalise_jacobi(&JacobiParams::default())
}

/// Locates the largest-magnitude element in the strict upper triangle.
///
/// # Returns
///
/// The row, the column and the magnitude. For matrices smaller than $`2 \times 2`$ this is
/// `(0, 1, 0.0)`.
fn find_max_offdiag(amat: &Matrix) -> (usize, usize, f64) {
    let n = amat.nrows();
    let mut res = (0, 1, 0.0);
    for i in 0..n {
        for j in (i + 1)..n {
            let val = amat[(i, j)].abs();
            if val > res.2 {
                res = (i, j, val);
            }
        }
    }
    res
}

/// Applies the Jacobi rotation that zeroes $`A_{pq}`$ to rows and columns $`p`$, $`q`$ of `amat`
/// and to columns $`p`$, $`q`$ of the accumulated eigenvector matrix `vmat`.
///
/// The rotation tangent is the smaller root of $`t^2 + 2\tau t - 1 = 0`$ with
/// $`\tau = (A_{qq} - A_{pp}) / 2A_{pq}`$, which keeps the rotation angle below $`\pi/4`$.
fn rotate(amat: &mut Matrix, vmat: &mut Matrix, p: usize, q: usize) {
    let n = amat.nrows();
    let app = amat[(p, p)];
    let aqq = amat[(q, q)];
    let apq = amat[(p, q)];
    let tau = (aqq - app) / (2.0 * apq);
    let sign = if tau >= 0.0 { 1.0 } else { -1.0 };
    let t = sign / (tau.abs() + (1.0 + tau * tau).sqrt());
    let c = 1.0 / (1.0 + t * t).sqrt();
    let s = t * c;

    for k in (0..n).filter(|&k| k != p && k != q) {
        let akp = amat[(k, p)];
        let akq = amat[(k, q)];
        amat[(k, p)] = c * akp - s * akq;
        amat[(p, k)] = amat[(k, p)];
        amat[(k, q)] = s * akp + c * akq;
        amat[(q, k)] = amat[(k, q)];
    }

    amat[(p, p)] = c * c * app - 2.0 * s * c * apq + s * s * aqq;
    amat[(q, q)] = s * s * app + 2.0 * s * c * apq + c * c * aqq;
    amat[(p, q)] = 0.0;
    amat[(q, p)] = 0.0;

    for k in 0..n {
        let vkp = vmat[(k, p)];
        let vkq = vmat[(k, q)];
        vmat[(k, p)] = c * vkp - s * vkq;
        vmat[(k, q)] = s * vkp + c * vkq;
    }
}
