//! Catalog configuration loading from the catalog TOML file.
//!
//! The file defines the fixed set of teams a sale can be attributed to,
//! together with each team's fundraising quota, and the dishes used to
//! seed an empty catalog on first run.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{collections::HashSet, path::Path};

/// Configuration structure representing the entire catalog file
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Teams in reporting order
    pub teams: Vec<TeamConfig>,
    /// Dishes inserted when the catalog table is empty
    #[serde(default)]
    pub dishes: Vec<DishConfig>,
}

/// A team that sells dishes and reports against a quota
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TeamConfig {
    /// Identifier sent by the client (e.g., "exploradores")
    pub key: String,
    /// Display name (e.g., "Exploradores")
    pub name: String,
    /// Fundraising quota in units sold
    pub quota: u32,
}

/// Seed data for one dish
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DishConfig {
    /// Display name
    pub name: String,
    /// Units available for sale
    pub stock: i32,
    /// Cost per unit
    pub cost_price: f64,
    /// Sale price per unit
    pub sale_price: f64,
}

impl CatalogConfig {
    /// Looks up a team by its key.
    #[must_use]
    pub fn team(&self, key: &str) -> Option<&TeamConfig> {
        self.teams.iter().find(|team| team.key == key)
    }

    /// Checks the invariants the rest of the crate relies on.
    ///
    /// # Errors
    /// Returns `Error::Config` if there are no teams, a team key is empty or
    /// repeated, or a seed dish has an empty name, negative stock or an
    /// invalid price.
    pub fn validate(&self) -> Result<()> {
        if self.teams.is_empty() {
            return Err(config_error("at least one team must be configured"));
        }

        let mut seen = HashSet::new();
        for team in &self.teams {
            if team.key.trim().is_empty() {
                return Err(config_error("team key cannot be empty"));
            }
            if !seen.insert(team.key.as_str()) {
                return Err(config_error(&format!("duplicate team key '{}'", team.key)));
            }
        }

        for dish in &self.dishes {
            if dish.name.trim().is_empty() {
                return Err(config_error("dish name cannot be empty"));
            }
            if dish.stock < 0 {
                return Err(config_error(&format!(
                    "dish '{}' has negative stock",
                    dish.name
                )));
            }
            for price in [dish.cost_price, dish.sale_price] {
                if !price.is_finite() || price < 0.0 {
                    return Err(config_error(&format!(
                        "dish '{}' has an invalid price",
                        dish.name
                    )));
                }
            }
        }

        Ok(())
    }
}

fn config_error(message: &str) -> Error {
    Error::Config {
        message: message.to_string(),
    }
}

/// Parses and validates catalog configuration from TOML text.
///
/// # Errors
/// Returns an error if the TOML syntax is invalid, required fields are
/// missing, or validation fails.
pub fn parse_config(contents: &str) -> Result<CatalogConfig> {
    let config: CatalogConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog config: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads catalog configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Validation fails
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading catalog configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}
