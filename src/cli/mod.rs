//! # Command Line Surface
//!
//! The `cmdnav` binary's own arguments, plus the bridge from clap command
//! definitions to the navigation tree.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

/// `clap::Command` to [`crate::models::CommandSpec`].
pub mod clap_adapter;
/// Bundled demonstration commands.
pub mod demo;
/// Runs leaves through clap.
pub mod invoker;

/// Verbosity levels accepted by `--log-level`, quietest first.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// No logging.
    Off,
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Informational messages.
    Info,
    /// Resolution traces.
    Debug,
    /// Everything, per token.
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

const LEVELS: [LevelFilter; 6] = [
    LevelFilter::Off,
    LevelFilter::Error,
    LevelFilter::Warn,
    LevelFilter::Info,
    LevelFilter::Debug,
    LevelFilter::Trace,
];

/// cmdnav: navigate a command hierarchy like a filesystem.
#[derive(Parser, Debug)]
#[command(
    name = "cmdnav",
    author,
    version,
    about,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
pub struct Cli {
    /// Configuration file. Defaults to `$CMDNAV_CONFIG`, then the user config directory.
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// More log output. Repeat for more.
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Less log output. Repeat for less.
    #[arg(long, short = 'q', action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Base log level, shifted by `-v`/`-q`. `RUST_LOG` applies when no level flag is given.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Disable fuzzy matching in completion, whatever the config says.
    #[arg(long, global = true)]
    pub no_fuzzy: bool,

    /// Group to start in, e.g. `/level1A/level2A`.
    #[arg(long, value_name = "PATH", global = true)]
    pub start_at: Option<String>,

    /// Subcommand; the prompt runs when absent.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

/// Subcommands of the binary.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Start the interactive prompt (the default).
    #[command(hide = true)]
    Prompt,
}

impl Cli {
    /// Effective log level, or `None` to leave the choice to `RUST_LOG`.
    pub fn log_level_filter(&self) -> Option<LevelFilter> {
        if self.log_level.is_none() && self.verbose == 0 && self.quiet == 0 {
            return None;
        }
        let base = LevelFilter::from(self.log_level.unwrap_or(LogLevel::Warn));
        let index = LEVELS.iter().position(|&l| l == base).unwrap_or(2);
        let shifted = (index + usize::from(self.verbose))
            .saturating_sub(usize::from(self.quiet))
            .min(LEVELS.len() - 1);
        LEVELS.get(shifted).copied()
    }
}
