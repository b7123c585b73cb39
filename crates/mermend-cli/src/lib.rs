//! CLI logic for the mermend diagram sanitizer.
//!
//! This module contains the core CLI logic: reading the input document,
//! running validation, and writing the corrected text or JSON verdict.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use log::{debug, info};
use thiserror::Error;

use mermend::{ValidateError, validate};

/// Errors the CLI can report.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document was rejected; carries the source for rich diagnostics.
    #[error("{err}")]
    Invalid { err: ValidateError, src: String },

    #[error("Failed to parse TOML configuration: {0}")]
    ConfigParse(String),

    #[error("Missing configuration file: {0}")]
    ConfigMissing(PathBuf),
}

/// Run the mermend CLI application
///
/// Reads the input document, validates and repairs it, and writes the
/// result. In JSON mode the full verdict is emitted (valid or not); in
/// text mode the corrected text (or the untouched input) is written, and
/// an invalid verdict becomes a [`CliError::Invalid`].
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid documents (text mode only)
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(input_path = args.input; "Sanitizing diagram");

    // Load configuration
    let options = config::load_config(args.config.as_ref())?;

    // Read input document
    let source = read_input(&args.input)?;

    // Validate and repair
    let verdict = validate(&source, &options);

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&verdict).expect("verdict serialization is infallible");
        write_output(args.output.as_deref(), &rendered)?;
        return match verdict.error() {
            Some(err) => Err(CliError::Invalid {
                err: err.clone(),
                src: source,
            }),
            None => Ok(()),
        };
    }

    if let Some(err) = verdict.error() {
        return Err(CliError::Invalid {
            err: err.clone(),
            src: source,
        });
    }

    let corrected = verdict.corrected().unwrap_or(&source);
    debug!(changed = verdict.corrected().is_some(), warnings = verdict.warnings().len();
        "writing sanitized output");
    write_output(args.output.as_deref(), corrected)?;

    info!("Completed successfully");
    Ok(())
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<(), CliError> {
    match path {
        Some(path) => {
            let mut text = content.to_string();
            if !text.ends_with('\n') {
                text.push('\n');
            }
            fs::write(path, text)?;
        }
        None => println!("{content}"),
    }
    Ok(())
}
