use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const CONFIG_PATH_ENV: &str = "TIMELINE_CONFIG";
pub const EXPORT_PATH_ENV: &str = "TIMELINE_EXPORT";
pub const HTTP_ADDR_ENV: &str = "TIMELINE_HTTP_ADDR";

const DEFAULT_CONFIG_PATH: &str = "timeline-config.json";
const DEFAULT_EXPORT_PATH: &str = "timeline-export.xlsx";
const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub config_path: PathBuf,
    pub export_path: PathBuf,
    pub http_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
        }
    }
}

impl Settings {
    /// Defaults overridden by any non-empty `TIMELINE_*` variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Settings::default();
        Self {
            config_path: read(CONFIG_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.config_path),
            export_path: read(EXPORT_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.export_path),
            http_addr: read(HTTP_ADDR_ENV).unwrap_or(defaults.http_addr),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.http_addr.parse()
    }
}
