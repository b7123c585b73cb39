//! Command-line argument definitions for the mermend CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, output format, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the mermend diagram sanitizer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram file, or `-` for stdin
    #[arg(help = "Path to the input file, or - for stdin")]
    pub input: String,

    /// Path to write the corrected text; defaults to stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Emit the full validation verdict as JSON instead of corrected text
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
