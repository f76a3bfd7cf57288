use std::fs;

use anyhow::{self, Context};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use shellmodel::interfaces::cli::{log_heading, Cli};
use shellmodel::interfaces::input::ShellModelInput;
use shellmodel::interfaces::InputHandle;
use shellmodel::io::OUTPUT_TARGET;

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    log_heading();

    let input = match cli.config.as_ref() {
        Some(config) => {
            let yaml = fs::read_to_string(config)
                .with_context(|| format!("Unable to read `{}`.", config.display()))?;
            ShellModelInput::from_yaml_str(&yaml)
                .with_context(|| format!("Invalid input file `{}`.", config.display()))?
        }
        None => {
            log::info!("No input file given; running the built-in p3/2 model.");
            ShellModelInput::default()
        }
    };
    input.handle()
}

/// Routes the `shellmodel-output` report to stdout and all other diagnostics to stderr at a
/// level set by the number of `-v` flags.
fn init_logging(verbosity: u8) -> Result<(), anyhow::Error> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let output = ConsoleAppender::builder()
        .target(Target::Stdout)
        .encoder(Box::new(PatternEncoder::new("{m}{n}")))
        .build();
    let diagnostics = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%H:%M:%S)} {h({l:<5})} {t} - {m}{n}",
        )))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("output", Box::new(output)))
        .appender(Appender::builder().build("diagnostics", Box::new(diagnostics)))
        .logger(
            Logger::builder()
                .appender("output")
                .additive(false)
                .build(OUTPUT_TARGET, LevelFilter::Info),
        )
        .build(Root::builder().appender("diagnostics").build(level))
        .context("Unable to configure logging.")?;
    log4rs::init_config(config).context("Unable to initialise logging.")?;
    Ok(())
}
