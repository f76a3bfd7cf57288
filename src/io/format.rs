//! Nice shell-model output formatting.

use std::fmt;

use log;

const BANNER_LENGTH: usize = 80;

/// Logs a warning to the `shellmodel-output` logger.
macro_rules! shellmodel_warn {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        log::warn!($fmt, $($($arg)*)?);
        log::warn!(target: "shellmodel-output", $fmt, $($($arg)*)?);
    }
}

/// Logs a main output line to the `shellmodel-output` logger.
macro_rules! shellmodel_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "shellmodel-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {shellmodel_output, shellmodel_warn};

/// Logs a nicely formatted section title to the `shellmodel-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    shellmodel_output!("┌──{bar}──┐");
    shellmodel_output!("│§ {title:^length$} §│");
    shellmodel_output!("└──{bar}──┘");
}

/// Logs a nicely formatted subtitle to the `shellmodel-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    shellmodel_output!("{subtitle}");
    shellmodel_output!("{bar}");
}

/// Writes a nicely formatted subtitle.
pub(crate) fn write_subtitle(f: &mut fmt::Formatter<'_>, subtitle: &str) -> fmt::Result {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    writeln!(f, "{subtitle}")?;
    writeln!(f, "{bar}")?;
    Ok(())
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// A trait for logging shell-model outputs nicely.
pub(crate) trait ShellModelOutput: fmt::Debug + fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            shellmodel_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> ShellModelOutput for T where T: fmt::Debug + fmt::Display {}
