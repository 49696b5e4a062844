/// Database connection and schema creation
pub mod database;

/// Teams, quotas and seed dishes loaded from the catalog TOML file
pub mod catalog;

/// Listener settings read from environment variables
pub mod server;

pub use catalog::{CatalogConfig, DishConfig, TeamConfig};
pub use server::ServerConfig;
