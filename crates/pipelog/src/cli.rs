//! CLI argument definitions

use clap::Parser;
use pipelog_core::Overrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pipelog")]
#[command(
    version,
    about = "Capture stdin from a program into size-rotated log files. \
             Command line args override config file settings."
)]
pub struct Cli {
    /// JSON config file to load settings from
    #[arg(short = 'c', long)]
    pub config_file: Option<PathBuf>,

    /// Base logfile name
    #[arg(short = 'f', long)]
    pub logfile_name: Option<String>,

    /// Log file directory
    #[arg(short = 'p', long)]
    pub path: Option<PathBuf>,

    /// Max file size in bytes
    #[arg(short = 'm', long)]
    pub max_logfile_size: Option<u64>,

    /// Total number of logfiles retained
    #[arg(short = 'n', long)]
    pub max_number_logfiles: Option<usize>,

    /// Add a timestamp to every entry
    #[arg(short = 't', long)]
    pub timestamp: bool,

    /// Do not add timestamps
    #[arg(long, conflicts_with = "timestamp")]
    pub no_timestamp: bool,

    /// Generate a config JSON file with the built-in defaults and exit
    #[arg(long, value_name = "PATH")]
    pub create_config_file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Map the explicit flags onto the config override layer
    pub fn overrides(&self) -> Overrides {
        Overrides {
            logfile_name: self.logfile_name.clone(),
            path: self.path.clone(),
            max_number_logfiles: self.max_number_logfiles,
            max_logfile_size: self.max_logfile_size,
            timestamp: if self.timestamp {
                Some(true)
            } else if self.no_timestamp {
                Some(false)
            } else {
                None
            },
        }
    }
}
