use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use thiserror::Error;

/// Environment variable consulted first for the API credential.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Key used when neither the environment nor the config file provides one.
const FALLBACK_API_KEY: &str = "dafefe76bbed2c90f4d89aa8784436a4";

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine platform config directory")]
    NoConfigDir,

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// On-disk configuration, stored as TOML in the platform config directory.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    pub api_key: Option<String>,
}

impl ConfigFile {
    /// Load from disk, or return an empty default on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Save to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.clone(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Resolved runtime configuration, constructed once at startup and passed by
/// reference into the query service.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub units: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: FALLBACK_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            units: "metric".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Resolve the credential: environment variable, then config file, then
    /// the built-in fallback key.
    pub fn resolve() -> Self {
        let from_env = std::env::var(API_KEY_ENV).ok();
        let from_file = ConfigFile::load().ok().and_then(|file| file.api_key);

        Self {
            api_key: resolve_api_key(from_env, from_file),
            ..Self::default()
        }
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

fn resolve_api_key(from_env: Option<String>, from_file: Option<String>) -> String {
    let non_empty = |key: String| if key.trim().is_empty() { None } else { Some(key) };

    from_env
        .and_then(non_empty)
        .or_else(|| from_file.and_then(non_empty))
        .unwrap_or_else(|| {
            tracing::warn!(
                "no API key in {API_KEY_ENV} or the config file, using the built-in fallback key"
            );
            FALLBACK_API_KEY.to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_beats_config_file() {
        let key = resolve_api_key(Some("ENV_KEY".into()), Some("FILE_KEY".into()));
        assert_eq!(key, "ENV_KEY");
    }

    #[test]
    fn config_file_beats_fallback() {
        let key = resolve_api_key(None, Some("FILE_KEY".into()));
        assert_eq!(key, "FILE_KEY");
    }

    #[test]
    fn empty_values_fall_through() {
        let key = resolve_api_key(Some("  ".into()), Some(String::new()));
        assert_eq!(key, FALLBACK_API_KEY);
    }

    #[test]
    fn defaults_point_at_the_live_api() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.units, "metric");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_file_roundtrips_through_toml() {
        let file = ConfigFile {
            api_key: Some("KEY".into()),
        };
        let serialized = toml::to_string_pretty(&file).expect("serialize should succeed");
        let parsed: ConfigFile = toml::from_str(&serialized).expect("parse should succeed");
        assert_eq!(parsed.api_key.as_deref(), Some("KEY"));
    }
}
