//! # shellmodel: exact diagonalisation of a toy nuclear shell model
//!
//! `shellmodel` computes the many-body energy spectrum and one-body observables of a small
//! fermionic system from a set of single-particle orbitals and one- and two-body interaction
//! coefficients. It is meant for exploring exact diagonalisation on tiny configuration spaces:
//! - enumeration of the fixed-particle-number Slater-determinant basis over at most 64 orbitals,
//! - fermionic creation and annihilation with sign tracking on occupation bitmasks,
//! - assembly of the dense many-body Hamiltonian
//!   ```math
//!       \hat{H} = \sum_p \varepsilon_p \hat{a}^{\dagger}_p \hat{a}_p
//!           + \frac{1}{4} \sum_{abcd} v_{abcd}
//!             \hat{a}^{\dagger}_a \hat{a}^{\dagger}_b \hat{a}_c \hat{a}_d,
//!   ```
//! - diagonalisation by cyclic Jacobi rotations, and
//! - expectation values and transition strengths of arbitrary one-body operators.
//!
//! No angular-momentum or parity blocking is performed and no iterative eigensolver is provided,
//! so the determinant basis is diagonalised in full.
//!
//! ## Examples and usage
//!
//! For most items (structs, enums, functions, and traits), their usages are illustrated in test
//! functions. The `shellmodel` binary runs a built-in p3/2 model, or a model described by a YAML
//! file passed with `--config` (see [`interfaces::input::ShellModelInput`]).
//!
//! ## License
//!
//! GNU Lesser General Public License v3.0.

pub mod basis;
pub mod diagonalisation;
pub mod drivers;
pub mod error;
pub mod hamiltonian;
pub mod interfaces;
pub mod io;
pub mod linalg;
pub mod model_space;
pub mod observables;
pub mod operators;
pub mod second_quantisation;
