use std::path::PathBuf;

use clap::Parser;

use crate::platform::logging::LogDestination;

/// Reads recognized barcodes from stdin, one per line, and submits each to the
/// configured product server.
///
/// Lines starting with `:` are commands: `:host <h>`, `:port <p>`, `:again`,
/// `:access`, `:history`, `:quit`.
#[derive(Debug, Parser)]
#[command(name = "scanner_app", version, about)]
pub struct Cli {
    /// Server settings file (ron).
    #[arg(long, default_value = "scanner_settings.ron")]
    pub settings: PathBuf,

    /// Set and persist the server host before scanning starts.
    #[arg(long)]
    pub host: Option<String>,

    /// Set and persist the server port before scanning starts.
    #[arg(long)]
    pub port: Option<String>,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    #[arg(long, default_value = "scanner.log")]
    pub log_file: PathBuf,

    /// Log at debug level.
    #[arg(long)]
    pub verbose: bool,

    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,
}
