//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{fs, path::Path};

use directories::ProjectDirs;
use log::{debug, info};

use mermend::SanitizeOptions;

use crate::CliError;

/// Find and load sanitizer options from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (mermend/config.toml)
/// 3. Platform-specific config directory
/// 4. Default options if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<SanitizeOptions, CliError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("mermend/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "mermend", "mermend") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. If no config is found, return default options
    debug!("No configuration file found, using default options");
    Ok(SanitizeOptions::default())
}

/// Load sanitizer options from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<SanitizeOptions, CliError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CliError::ConfigMissing(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let options: SanitizeOptions =
        toml::from_str(&content).map_err(|e| CliError::ConfigParse(e.to_string()))?;

    Ok(options)
}
