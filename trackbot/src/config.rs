//! Configuration resolution for trackbot
//!
//! Settings resolve with ENV > TOML priority. The database URL and the
//! generation API key are required; startup aborts without them.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default port matches the reference deployment.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";
/// Generation model identifier.
pub const DEFAULT_GENERATION_MODEL: &str = "models/gemini-1.5-flash-latest";
/// Local embedding server default.
pub const DEFAULT_EMBEDDING_URL: &str = "http://127.0.0.1:8080";

/// Optional TOML overlay (`~/.config/trackbot/config.toml` or
/// `TRACKBOT_CONFIG`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub database_url: Option<String>,
    pub generation_api_key: Option<String>,
    pub generation_model: Option<String>,
    pub embedding_url: Option<String>,
    pub bind_addr: Option<String>,
}

/// Resolved application settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// SQLite URL, e.g. `sqlite://trackbot.db?mode=rwc`
    pub database_url: String,
    /// API key for the generative-language collaborator
    pub generation_api_key: String,
    /// Generation model identifier
    pub generation_model: String,
    /// Base URL of the embedding server
    pub embedding_url: String,
    /// Listen address for the HTTP surface
    pub bind_addr: String,
}

impl Settings {
    /// Load settings with ENV > TOML priority.
    pub fn load() -> Result<Self> {
        let toml_config = load_toml_config();

        let database_url = resolve(
            "TRACKBOT_DATABASE_URL",
            toml_config.database_url.as_deref(),
        )
        .ok_or_else(|| {
            Error::Config(
                "Database URL not configured. Set TRACKBOT_DATABASE_URL or \
                 database_url in the TOML config."
                    .to_string(),
            )
        })?;

        let generation_api_key = resolve(
            "TRACKBOT_GENERATION_API_KEY",
            toml_config.generation_api_key.as_deref(),
        )
        .ok_or_else(|| {
            Error::Config(
                "Generation API key not configured. Set TRACKBOT_GENERATION_API_KEY \
                 or generation_api_key in the TOML config."
                    .to_string(),
            )
        })?;

        let generation_model = resolve(
            "TRACKBOT_GENERATION_MODEL",
            toml_config.generation_model.as_deref(),
        )
        .unwrap_or_else(|| DEFAULT_GENERATION_MODEL.to_string());

        let embedding_url = resolve("TRACKBOT_EMBEDDING_URL", toml_config.embedding_url.as_deref())
            .unwrap_or_else(|| DEFAULT_EMBEDDING_URL.to_string());

        let bind_addr = resolve("TRACKBOT_BIND_ADDR", toml_config.bind_addr.as_deref())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Ok(Settings {
            database_url,
            generation_api_key,
            generation_model,
            embedding_url,
            bind_addr,
        })
    }
}

/// Resolve one setting: environment variable first, then TOML value.
fn resolve(env_var: &str, toml_value: Option<&str>) -> Option<String> {
    if let Ok(value) = std::env::var(env_var) {
        if !value.trim().is_empty() {
            return Some(value);
        }
    }
    toml_value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
}

/// Read the optional TOML overlay; malformed files are warned about and
/// treated as absent rather than aborting startup.
fn load_toml_config() -> TomlConfig {
    let path = toml_config_path();
    let Some(path) = path else {
        return TomlConfig::default();
    };
    if !path.exists() {
        return TomlConfig::default();
    }
    match read_toml(&path) {
        Ok(config) => {
            info!("Loaded TOML config: {}", path.display());
            config
        }
        Err(e) => {
            warn!("Ignoring TOML config {}: {}", path.display(), e);
            TomlConfig::default()
        }
    }
}

fn read_toml(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}

fn toml_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("TRACKBOT_CONFIG") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".config").join("trackbot").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_env_over_toml() {
        std::env::set_var("TRACKBOT_TEST_RESOLVE", "from-env");
        let value = resolve("TRACKBOT_TEST_RESOLVE", Some("from-toml"));
        assert_eq!(value, Some("from-env".to_string()));
        std::env::remove_var("TRACKBOT_TEST_RESOLVE");
    }

    #[test]
    fn resolve_falls_back_to_toml() {
        let value = resolve("TRACKBOT_TEST_RESOLVE_UNSET", Some("from-toml"));
        assert_eq!(value, Some("from-toml".to_string()));
    }

    #[test]
    fn resolve_ignores_blank_values() {
        let value = resolve("TRACKBOT_TEST_RESOLVE_UNSET", Some("   "));
        assert_eq!(value, None);
    }

    #[test]
    fn parses_toml_overlay() {
        let config: TomlConfig = toml::from_str(
            r#"
            database_url = "sqlite://test.db?mode=rwc"
            bind_addr = "127.0.0.1:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.database_url.as_deref(), Some("sqlite://test.db?mode=rwc"));
        assert_eq!(config.bind_addr.as_deref(), Some("127.0.0.1:9000"));
        assert!(config.generation_api_key.is_none());
    }
}
