use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Minimum log level to print out
    #[clap(long, value_enum, default_value = "info")]
    pub log_level: LevelFilter,
}

impl LogArgs {
    /// Logs go to stderr only, stdout is reserved for the utility's own output.
    pub fn init(&self) -> Result<()> {
        CombinedLogger::init(vec![TermLogger::new(
            self.log_level.into(),
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )])
        .context("Could not configure the logger")
    }
}

#[repr(usize)]
#[derive(ValueEnum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum LevelFilter {
    /// A level lower than all log levels.
    Off,
    /// Corresponds to the `Error` log level.
    Error,
    /// Corresponds to the `Warn` log level.
    Warn,
    /// Corresponds to the `Info` log level.
    Info,
    /// Corresponds to the `Debug` log level.
    Debug,
    /// Corresponds to the `Trace` log level.
    Trace,
}

impl From<LevelFilter> for log::LevelFilter {
    fn from(level: LevelFilter) -> Self {
        match level {
            LevelFilter::Off => log::LevelFilter::Off,
            LevelFilter::Error => log::LevelFilter::Error,
            LevelFilter::Warn => log::LevelFilter::Warn,
            LevelFilter::Info => log::LevelFilter::Info,
            LevelFilter::Debug => log::LevelFilter::Debug,
            LevelFilter::Trace => log::LevelFilter::Trace,
        }
    }
}
