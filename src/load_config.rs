/// `load_config` module: resolves the run configuration from the environment and CLI overrides.
///
/// The API key only ever comes from the `API_KEY` environment variable (or a `.env`
/// file loaded by the binary beforehand). It is checked first, so a missing key
/// fails the run before any directory is scanned.
///
/// # Errors
/// All errors use `anyhow::Error` and name the offending variable or path; they are
/// surfaced at the CLI boundary.
use anyhow::Result;
use std::path::PathBuf;
use tracing::{error, info};

use crate::config::{ImportConfig, DEFAULT_API_URL};

pub const API_KEY_VAR: &str = "API_KEY";

pub fn load_config(dir: Option<PathBuf>, api_url: Option<String>) -> Result<ImportConfig> {
    let api_key = match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.is_empty() => {
            info!(api_key_len = key.len(), "API_KEY found in env");
            key
        }
        Ok(_) => {
            error!("API_KEY environment variable is empty");
            anyhow::bail!("API_KEY environment variable is not set");
        }
        Err(e) => {
            error!(error = ?e, "API_KEY environment variable not set");
            return Err(anyhow::anyhow!("API_KEY environment variable is not set: {e}"));
        }
    };

    let base_dir = match dir {
        Some(dir) => dir,
        None => match std::env::current_dir() {
            Ok(cwd) => cwd,
            Err(e) => {
                error!(error = ?e, "Failed to get current directory");
                return Err(anyhow::anyhow!("Error getting current directory: {e}"));
            }
        },
    };

    let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let config = ImportConfig {
        base_dir,
        api_key,
        api_url,
    };
    config.trace_loaded();
    Ok(config)
}
