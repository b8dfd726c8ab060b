//! Runtime settings shared by the crawler and the image collector.
//!
//! Settings can be read from a TOML file and then overridden from the command line:
//!
//! ```toml
//! output_dir = "/data/dermis"
//! download_timeout_secs = 20
//! ```
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::dermis::LISTING_URL;
use crate::search::SEARCH_URL;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError { path: String, source: io::Error },

    #[error("Invalid config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory holding one subdirectory per query.
    pub output_dir: PathBuf,
    /// Image search ajax endpoint.
    pub search_url: String,
    /// Diagnosis listing page, `{letter}` is replaced by each letter of the alphabet.
    pub listing_url: String,
    pub download_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("images"),
            search_url: SEARCH_URL.to_string(),
            listing_url: LISTING_URL.to_string(),
            download_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Reads settings from `path`, or returns the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        debug!("Reading config from {}", path.display());
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;

        Ok(toml::from_str(&raw)?)
    }

    #[inline]
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn missing_file_means_defaults() {
        let config = Config::load(None).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.output_dir, PathBuf::from("images"));
        assert_eq!(config.download_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new("dermis-config").unwrap();
        let path = dir.path().join("collector.toml");
        fs::write(&path, "output_dir = \"/tmp/derm\"\ndownload_timeout_secs = 3\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/derm"));
        assert_eq!(config.download_timeout_secs, 3);
        assert_eq!(config.search_url, SEARCH_URL);
        assert_eq!(config.listing_url, LISTING_URL);
    }

    #[test]
    fn bad_file_is_an_error() {
        let dir = TempDir::new("dermis-config").unwrap();
        let path = dir.path().join("collector.toml");
        fs::write(&path, "download_timeout_secs = \"soon\"").unwrap();

        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            Config::load(Some(&dir.path().join("nope.toml"))),
            Err(ConfigError::ReadError { .. })
        ));
    }
}
