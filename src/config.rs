use std::path::PathBuf;
use tracing::{debug, info};

/// Template import endpoint of the panel API.
pub const DEFAULT_API_URL: &str = "https://api.acepanel.net/template/import";

/// Maximum number of templates sent in one request.
pub const BATCH_SIZE: usize = 10;

pub const METADATA_FILE: &str = "data.yml";
pub const COMPOSE_FILE: &str = "docker-compose.yml";
pub const LOGO_SVG_FILE: &str = "logo.svg";
pub const LOGO_PNG_FILE: &str = "logo.png";

/// Fully resolved configuration for one import run.
pub struct ImportConfig {
    /// Directory whose immediate subdirectories are template directories.
    pub base_dir: PathBuf,
    pub api_key: String,
    pub api_url: String,
}

impl std::fmt::Debug for ImportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportConfig")
            .field("base_dir", &self.base_dir)
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl ImportConfig {
    pub fn trace_loaded(&self) {
        info!(
            base_dir = %self.base_dir.display(),
            api_url = %self.api_url,
            api_key_len = self.api_key.len(),
            "Loaded ImportConfig"
        );
        debug!(?self, "ImportConfig loaded (full debug)");
    }
}
