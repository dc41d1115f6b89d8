// API key lookup
//
// The key comes from the environment first and then from
// ~/.dreambuild/secrets.toml (global only). This module never writes the file.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables consulted for the API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Secrets stored in ~/.dreambuild/secrets.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecretsConfig {
    #[serde(default)]
    pub gemini_api_key: Option<String>,
}

impl SecretsConfig {
    /// Get the secrets file path (~/.dreambuild/secrets.toml)
    pub fn get_secrets_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".dreambuild").join("secrets.toml"))
    }

    /// Load secrets from the default location
    pub fn load() -> Result<Self> {
        let path = Self::get_secrets_path()
            .ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Self::load_from(&path)
    }

    /// Load secrets from `path`; a missing file is empty
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read secrets file '{}': {}", path.display(), e))?;

        let config: SecretsConfig = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse secrets file '{}': {}", path.display(), e))?;

        Ok(config)
    }

    /// The stored key, if it is non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Resolve the API key: the first non-blank env var wins, then the secrets file.
///
/// `env` is the variable lookup, so callers can pass `std::env::var(..).ok()`.
pub fn resolve_api_key<F>(env: F, secrets: &SecretsConfig) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| env(name))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
        .or_else(|| secrets.api_key().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_gemini_env_var_preferred() {
        let env = |name: &str| match name {
            "GEMINI_API_KEY" => Some("from-gemini".to_string()),
            "API_KEY" => Some("from-generic".to_string()),
            _ => None,
        };
        assert_eq!(
            resolve_api_key(env, &SecretsConfig::default()).as_deref(),
            Some("from-gemini")
        );
    }

    #[test]
    fn test_blank_env_falls_through() {
        let env = |name: &str| match name {
            "GEMINI_API_KEY" => Some("  ".to_string()),
            "API_KEY" => Some("from-generic".to_string()),
            _ => None,
        };
        assert_eq!(
            resolve_api_key(env, &SecretsConfig::default()).as_deref(),
            Some("from-generic")
        );
    }

    #[test]
    fn test_secrets_file_fallback() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secrets.toml");
        fs::write(&path, "gemini_api_key = \"file-key\"\n").unwrap();

        let secrets = SecretsConfig::load_from(&path).unwrap();
        assert_eq!(resolve_api_key(no_env, &secrets).as_deref(), Some("file-key"));
    }

    #[test]
    fn test_nothing_configured() {
        let dir = TempDir::new().unwrap();
        let secrets = SecretsConfig::load_from(&dir.path().join("missing.toml")).unwrap();
        assert!(resolve_api_key(no_env, &secrets).is_none());
    }
}
