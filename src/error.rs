//! Error kinds raised by the shell-model core.

use std::error::Error;
use std::fmt;

/// An enumerated type for the failure modes of the shell-model core.
///
/// All of these are immediate hard failures: inputs are assumed to be small and validated by the
/// caller, so nothing is retried or recovered from locally.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellModelError {
    /// Particle or orbital counts that cannot describe a valid model space or basis.
    InvalidConfiguration(String),

    /// Vector or matrix shapes that are incompatible for the requested operation.
    DimensionMismatch(String),

    /// A matrix handed to the eigensolver that is not square.
    NonSquareMatrix {
        /// Number of rows of the offending matrix.
        nrows: usize,

        /// Number of columns of the offending matrix.
        ncols: usize,
    },

    /// A Jacobi diagonalisation that hit its iteration cap before the largest off-diagonal
    /// element fell below the tolerance. This is only raised on request, via
    /// [`crate::diagonalisation::EigenSystem::ensure_converged`].
    NotConverged {
        /// Number of rotations performed.
        iterations: usize,

        /// Largest remaining off-diagonal magnitude.
        max_offdiag: f64,
    },
}

impl fmt::Display for ShellModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShellModelError::InvalidConfiguration(msg) => {
                write!(f, "Invalid configuration: {msg}")
            }
            ShellModelError::DimensionMismatch(msg) => write!(f, "Dimension mismatch: {msg}"),
            ShellModelError::NonSquareMatrix { nrows, ncols } => {
                write!(f, "Matrix must be square, but has shape ({nrows}, {ncols}).")
            }
            ShellModelError::NotConverged {
                iterations,
                max_offdiag,
            } => write!(
                f,
                "Jacobi diagonalisation not converged after {iterations} rotation(s): largest off-diagonal element is {max_offdiag:.3e}."
            ),
        }
    }
}

impl Error for ShellModelError {}
