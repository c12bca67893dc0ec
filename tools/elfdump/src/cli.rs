//! Command line parsing and [`DumpConfig`] construction.

use std::path::PathBuf;

use clap::{
    Arg, ArgMatches, Command,
    builder::{EnumValueParser, PathBufValueParser},
};

/// Description of a single `elfdump` invocation.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct DumpConfig {
    /// The path of the ELF file to dump.
    pub path: PathBuf,
    /// The most verbose [`LogLevel`] that is written to stderr.
    pub log_level: LogLevel,
}

/// Parses `elfdump`'s arguments to construct a [`DumpConfig`].
pub fn get_config() -> DumpConfig {
    parse_arguments(&command_parser().get_matches())
}

/// Parses the arguments required to produce a valid [`DumpConfig`].
fn parse_arguments(matches: &ArgMatches) -> DumpConfig {
    let path = matches
        .get_one::<PathBuf>("path")
        .cloned()
        .unwrap_or_else(|| unreachable!("`path` is a required argument"));

    let log_level = matches
        .get_one::<LogLevel>("log-level")
        .copied()
        .unwrap_or_else(|| unreachable!("`log-level` should have a default value"));

    DumpConfig { path, log_level }
}

/// Returns the command parser for `elfdump`.
fn command_parser() -> Command {
    let path = Arg::new("path")
        .value_name("PATH")
        .help("The 32-bit ELF file to dump")
        .value_parser(PathBufValueParser::new())
        .required(true);

    let log_level = Arg::new("log-level")
        .long("log-level")
        .env("ELFDUMP_LOG")
        .help("The most verbose log messages written to stderr")
        .value_parser(EnumValueParser::<LogLevel>::new())
        .default_value("warn");

    Command::new("elfdump")
        .about("Dumps the file header, program headers, and section headers of 32-bit ELF files")
        .arg(path)
        .arg(log_level)
        .arg_required_else_help(true)
}

/// The verbosity of the messages `elfdump` logs.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum LogLevel {
    /// Nothing is logged.
    Off,
    /// Only errors are logged.
    Error,
    /// Warnings about suspicious input and errors are logged.
    #[default]
    Warn,
    /// Informational messages and everything above are logged.
    Info,
    /// Decoding progress and everything above is logged.
    Debug,
    /// Everything is logged.
    Trace,
}

impl LogLevel {
    /// Returns the textual representation of the [`LogLevel`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Returns the [`log::LevelFilter`] corresponding to the [`LogLevel`].
    pub fn as_filter(&self) -> log::LevelFilter {
        match self {
            Self::Off => log::LevelFilter::Off,
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl clap::ValueEnum for LogLevel {
    fn value_variants<'a>() -> &'a [Self] {
        static LEVELS: &[LogLevel] = &[
            LogLevel::Off,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];

        LEVELS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}
