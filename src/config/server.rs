//! Listener settings loaded from the environment.
//!
//! `PORT` selects the TCP port and `KERMESSE_CONFIG` the catalog file.
//! Both fall back to defaults when unset.

use crate::errors::{Error, Result};
use std::{env, path::PathBuf};
use tracing::info;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CATALOG_PATH: &str = "config.toml";

/// Runtime settings for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port bound on all interfaces
    pub port: u16,
    /// Location of the catalog TOML file
    pub catalog_path: PathBuf,
}

impl ServerConfig {
    /// Reads the settings from the process environment.
    ///
    /// # Errors
    /// Returns `Error::Config` if `PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            env::var("PORT").ok().as_deref(),
            env::var("KERMESSE_CONFIG").ok().as_deref(),
        )
    }

    fn from_values(port: Option<&str>, catalog_path: Option<&str>) -> Result<Self> {
        let port = match port {
            Some(raw) => raw.trim().parse().map_err(|e| Error::Config {
                message: format!("Invalid PORT value '{raw}': {e}"),
            })?,
            None => {
                info!("PORT not set, using default: {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };

        let catalog_path = PathBuf::from(catalog_path.unwrap_or(DEFAULT_CATALOG_PATH));

        Ok(Self { port, catalog_path })
    }

    /// Address the listener binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
