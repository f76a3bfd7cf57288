//! Output helpers for the `shellmodel-output` log target.

pub(crate) mod format;

/// Name of the log target carrying the human-readable calculation report.
pub const OUTPUT_TARGET: &str = "shellmodel-output";
