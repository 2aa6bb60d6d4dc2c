// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 3000;

/// Which document store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUri {
    /// In-process store; contents are lost on restart.
    Memory,
    /// Google Cloud Firestore in the given project.
    Firestore { project_id: String },
}

impl FromStr for StoreUri {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::Invalid("STORE_URI", raw.to_string());
        let (scheme, rest) = raw.split_once("://").ok_or_else(invalid)?;
        match scheme {
            "memory" if rest.is_empty() => Ok(StoreUri::Memory),
            "firestore" if !rest.is_empty() && !rest.contains('/') => Ok(StoreUri::Firestore {
                project_id: rest.to_string(),
            }),
            _ => Err(invalid()),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Document store connection
    pub store_uri: StoreUri,
    /// Single origin allowed by CORS; any origin when unset
    pub allowed_origin: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            store_uri: StoreUri::Memory,
            allowed_origin: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let store_uri = match env::var("STORE_URI") {
            Ok(raw) => raw.trim().parse()?,
            Err(_) => StoreUri::Memory,
        };

        let allowed_origin = env::var("ALLOWED_ORIGIN")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            port,
            store_uri,
            allowed_origin,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_uri_parse() {
        assert_eq!("memory://".parse::<StoreUri>().unwrap(), StoreUri::Memory);
        assert_eq!(
            "firestore://my-project".parse::<StoreUri>().unwrap(),
            StoreUri::Firestore {
                project_id: "my-project".to_string()
            }
        );
    }

    #[test]
    fn test_store_uri_rejects_malformed() {
        for raw in ["", "memory", "memory://x", "firestore://", "firestore://a/b", "mongodb://h"] {
            assert!(raw.parse::<StoreUri>().is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("PORT", "4321");
        env::set_var("STORE_URI", "firestore://test-project");
        env::set_var("ALLOWED_ORIGIN", "https://tracker.example.com");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 4321);
        assert_eq!(
            config.store_uri,
            StoreUri::Firestore {
                project_id: "test-project".to_string()
            }
        );
        assert_eq!(
            config.allowed_origin.as_deref(),
            Some("https://tracker.example.com")
        );

        env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("PORT", _))
        ));

        env::remove_var("PORT");
        env::remove_var("STORE_URI");
        env::remove_var("ALLOWED_ORIGIN");
    }
}
