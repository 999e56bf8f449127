use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use tracker_logging::LogSink;

pub const LOG_FILE: &str = "tracker.log";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "resource_tracker",
    version,
    about = "Browse saved searches and the resources they match",
    long_about = "Loads saved searches from a resource tracker backend, shows the keywords of the selected searches and lists the matching resources.\n\nExamples:\n  resource_tracker --base-url http://localhost:5000/\n  resource_tracker -s 1 -s 2\n  resource_tracker -s 1 --format html -o resources.html\n  resource_tracker --interactive"
)]
pub struct CliArgs {
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to a RON config file (defaults to ./tracker.ron when present)."
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'u',
        long = "base-url",
        value_name = "URL",
        help_heading = "Input",
        help = "Root URL of the tracker backend (overrides the config file)."
    )]
    pub base_url: Option<String>,

    #[arg(
        short = 's',
        long = "select",
        value_name = "ID",
        action = ArgAction::Append,
        help_heading = "Input",
        help = "Saved search id to select (repeatable). Resources are fetched when any id is given."
    )]
    pub select: Vec<i64>,

    #[arg(
        short = 'i',
        long = "interactive",
        help_heading = "Input",
        help = "Read commands from stdin instead of running once."
    )]
    pub interactive: bool,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Text,
        help_heading = "Output",
        help = "Output format of the rendered view."
    )]
    pub format: OutputFormat,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered view to a file instead of stdout."
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long = "log",
        value_enum,
        default_value_t = LogTarget::Terminal,
        help_heading = "Output",
        help = "Where diagnostics are written."
    )]
    pub log: LogTarget,

    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        long = "print-config",
        help_heading = "Output",
        help = "Print the effective configuration as RON and exit."
    )]
    pub print_config: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Html,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
    Off,
}

impl LogTarget {
    /// Sinks for this target; the log file lives in the working directory.
    pub fn sinks(self) -> Vec<LogSink> {
        let file = || LogSink::File(PathBuf::from(LOG_FILE));
        match self {
            LogTarget::Terminal => vec![LogSink::Stderr],
            LogTarget::File => vec![file()],
            LogTarget::Both => vec![LogSink::Stderr, file()],
            LogTarget::Off => Vec::new(),
        }
    }
}

impl CliArgs {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
