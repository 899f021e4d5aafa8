//! Session configuration.
//!
//! Read from `~/.config/pcxforum/config.toml` at startup; a default file
//! with comments is created on first run. Missing fields fall back to
//! defaults, and the read-log path can be overridden through the
//! `PCXFORUM_READLOG_FILE` environment variable (see [`crate::readlog`]).

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::Deserialize;

/// Default base origin of the forum.
pub const DEFAULT_BOARD_URL: &str = "https://pcx-forum.com/";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base origin all resource paths are resolved against.
    pub base_url: String,
    /// Skip TLS certificate verification for the whole session.
    pub ignore_ssl: bool,
    /// Read fetches through the page cache. Responses are written into the
    /// cache either way, for consistency of state.
    pub use_cache: bool,
    /// Read-log file override; the environment variable wins over this.
    pub read_log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BOARD_URL.to_string(),
            ignore_ssl: false,
            use_cache: true,
            read_log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating a commented
    /// default file if none exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// `~/.config/pcxforum/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("pcxforum").join("config.toml"))
    }

    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        format!(
            r##"# pcxforum configuration

# Base origin of the forum. All resource paths are resolved against it.
base_url = "{DEFAULT_BOARD_URL}"

# Skip TLS certificate verification (self-signed mirrors).
ignore_ssl = false

# Serve repeated fetches of a page from a short-lived in-memory cache.
use_cache = true

# Where read message ids are recorded, one per line.
# The PCXFORUM_READLOG_FILE environment variable overrides this.
# read_log_file = "/home/me/.maniacread.log"
"##
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.base_url, DEFAULT_BOARD_URL);
        assert!(config.use_cache);
        assert!(!config.ignore_ssl);
        assert_eq!(config.read_log_file, None);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
ignore_ssl = true
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert!(config.ignore_ssl);
        assert_eq!(config.base_url, DEFAULT_BOARD_URL);
        assert!(config.use_cache);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.base_url, DEFAULT_BOARD_URL);
    }
}
