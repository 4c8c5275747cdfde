use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable naming the TOML configuration file.
pub const CONFIG_PATH_VAR: &str = "LSAG_CONFIG_PATH";

/// Configuration file read when [`CONFIG_PATH_VAR`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/election.toml";

/// Election size and session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionConfig {
    /// Number of candidates.
    pub candidates: usize,
    /// Number of voters, which is also the ring size.
    pub voters: usize,
    /// Fixed session id; a random one is drawn when absent.
    #[serde(default)]
    pub session_id: Option<u64>,
}

impl Default for ElectionConfig {
    fn default() -> Self {
        Self {
            candidates: 3,
            voters: 3,
            session_id: None,
        }
    }
}

impl ElectionConfig {
    /// Loads configuration from `.env` file, TOML file, and environment variables.
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables with `LSAG_` prefix (e.g., `LSAG_VOTERS=8`)
    /// 2. TOML configuration file (if exists)
    /// 3. `.env` file (if exists)
    /// 4. Built-in defaults
    ///
    /// The TOML file path can be set via `LSAG_CONFIG_PATH`. If not set, defaults to
    /// `./config/election.toml`. A missing file is silently skipped.
    ///
    /// # Environment Variable Examples
    /// ```bash
    /// LSAG_CANDIDATES=4
    /// LSAG_VOTERS=16
    /// LSAG_SESSION_ID=42
    /// ```
    ///
    /// # Errors
    /// Returns [`Error::Config`] if a source is malformed or contains invalid values.
    pub fn from_env() -> Result<Self> {
        // Attempt to load .env file (silently ignore if it doesn't exist)
        let _ = dotenvy::dotenv();

        let config_path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        Self::figment(&config_path)
            .merge(Env::prefixed("LSAG_").ignore(&["config_path"]))
            .extract()
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Loads configuration from defaults and one TOML file, ignoring the environment.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::figment(path)
            .extract()
            .map_err(|e| Error::Config(e.to_string()))
    }

    fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Toml::file(path))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if there is nothing to vote for or nobody to vote.
    pub fn validate(&self) -> Result<()> {
        if self.candidates == 0 {
            return Err(Error::Config("candidates cannot be zero".to_string()));
        }

        if self.voters == 0 {
            return Err(Error::Config("voters cannot be zero".to_string()));
        }

        Ok(())
    }
}
