use std::fs;
use std::path::Path;

use scanner_core::{ServerConfig, DEFAULT_PORT};
use scanner_engine::write_atomically;
use scanner_logging::{scan_error, scan_info, scan_warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSettings {
    #[serde(default)]
    host: String,
    #[serde(default = "default_port")]
    port: String,
}

fn default_port() -> String {
    DEFAULT_PORT.to_string()
}

/// Missing or unreadable settings fall back to an empty host and the default port.
pub(crate) fn load_settings(path: &Path) -> ServerConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ServerConfig::default();
        }
        Err(err) => {
            scan_warn!("Failed to read settings from {:?}: {}", path, err);
            return ServerConfig::default();
        }
    };

    let settings: PersistedSettings = match ron::from_str(&content) {
        Ok(settings) => settings,
        Err(err) => {
            scan_warn!("Failed to parse settings from {:?}: {}", path, err);
            return ServerConfig::default();
        }
    };

    scan_info!("Loaded server settings from {:?}", path);
    ServerConfig::new(settings.host, settings.port)
}

pub(crate) fn save_settings(path: &Path, config: &ServerConfig) {
    let settings = PersistedSettings {
        host: config.host.clone(),
        port: config.port.clone(),
    };
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&settings, pretty) {
        Ok(text) => text,
        Err(err) => {
            scan_error!("Failed to serialize settings: {}", err);
            return;
        }
    };

    if let Err(err) = write_atomically(path, content.as_bytes()) {
        scan_error!("Failed to write settings: {}", err);
    }
}
