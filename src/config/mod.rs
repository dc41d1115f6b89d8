// Application configuration
//
// Settings live in ~/.dreambuild/config.toml. Every section and key is
// optional; anything missing falls back to the built-in default.

pub mod secrets;

pub use secrets::{resolve_api_key, SecretsConfig};

use crate::commands::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};
use crate::gemini::client::DEFAULT_API_BASE;
use crate::gemini::requests::PAKISTAN_CENTROID;
use crate::gemini::LatLng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3420;
pub const DEFAULT_BIND: &str = "127.0.0.1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_base: String,
    pub image_model: String,
    pub text_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
        }
    }
}

/// Location hint for the maps-grounded search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundingConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            latitude: PAKISTAN_CENTROID.latitude,
            longitude: PAKISTAN_CENTROID.longitude,
        }
    }
}

impl GroundingConfig {
    pub fn lat_lng(&self) -> LatLng {
        LatLng {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub bind: String,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub grounding: GroundingConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// ~/.dreambuild/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".dreambuild").join("config.toml"))
    }

    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoHomeDir)?;
        Self::load_from(&path)
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AppConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
