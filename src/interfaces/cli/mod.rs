//! Command-line interface of the `shellmodel` binary.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::io::format::shellmodel_output;

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Logs a nicely formatted heading to the `shellmodel-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    shellmodel_output!("╭──────────────────────────────────────────────────────────────────────────────╮");
    shellmodel_output!("│                                                                              │");
    shellmodel_output!("│   ┌─┐┬ ┬┌─┐┬  ┬    ┌┬┐┌─┐┌┬┐┌─┐┬                                              │");
    shellmodel_output!("│   └─┐├─┤├┤ │  │    ││││ │ ││├┤ │                                              │");
    shellmodel_output!("│   └─┘┴ ┴└─┘┴─┘┴─┘  ┴ ┴└─┘─┴┘└─┘┴─┘                                            │");
    shellmodel_output!("│                                                                              │");
    shellmodel_output!("│   Exact diagonalisation in a Slater-determinant basis           {version:>12} │");
    shellmodel_output!("╰──────────────────────────────────────────────────────────────────────────────╯");
    shellmodel_output!("");
}

/// Command-line arguments of the `shellmodel` binary.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// A YAML input file describing the model space, the interaction and the observables. The
    /// built-in p3/2 model is run if this is omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increases the verbosity of diagnostic logging. May be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
