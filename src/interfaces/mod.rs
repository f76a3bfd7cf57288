//! Interfaces between the shell-model core and its users.

use anyhow;

pub mod cli;
pub mod input;

/// Trait for handling an input description.
pub trait InputHandle {
    /// Handles the input description and runs the appropriate calculations.
    fn handle(&self) -> Result<(), anyhow::Error>;
}
