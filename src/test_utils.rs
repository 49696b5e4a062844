//! Shared test utilities.
//!
//! Helpers for setting up in-memory databases and building catalog data
//! with sensible defaults.

use crate::{
    config::{CatalogConfig, catalog, database},
    core::dish,
    entities,
    errors::Result,
};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use std::{collections::BTreeMap, path::Path};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
///
/// The pool holds a single connection, so concurrent callers queue for it
/// and each transaction runs to completion before the next one starts.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await?;
    database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an `SQLite` database file at `path` behind a pool of several
/// connections, so transactions from different tasks genuinely overlap.
pub async fn setup_file_db(path: &Path) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
    options.max_connections(8).sqlx_logging(false);
    let db = Database::connect(options).await?;
    database::create_tables(&db).await?;
    Ok(db)
}

/// The catalog shipped in `config.toml`: four teams and three dishes.
pub fn test_catalog() -> CatalogConfig {
    #[allow(clippy::expect_used)]
    catalog::parse_config(include_str!("../config.toml")).expect("shipped config.toml is valid")
}

/// Sets up a database seeded with the shipped dishes.
/// Returns (db, catalog) for sale and report tests.
pub async fn setup_with_catalog() -> Result<(DatabaseConnection, CatalogConfig)> {
    let db = setup_test_db().await?;
    let catalog = test_catalog();
    dish::seed_catalog(&db, &catalog.dishes).await?;
    Ok((db, catalog))
}

/// Inserts a dish with nothing sold.
///
/// # Defaults
/// * `cost_price`: 20.0
/// * `sale_price`: 35.0
pub async fn create_test_dish(
    db: &DatabaseConnection,
    name: &str,
    stock: i32,
) -> Result<entities::dish::Model> {
    let dish = entities::dish::ActiveModel {
        name: Set(name.to_string()),
        stock: Set(stock),
        units_sold: Set(0),
        cost_price: Set(20.0),
        sale_price: Set(35.0),
        ..Default::default()
    };
    dish.insert(db).await.map_err(Into::into)
}

/// Builds the `cantidades` map of a sale request from (dish id, quantity) pairs.
pub fn quantities(pairs: &[(i64, i64)]) -> BTreeMap<String, i64> {
    pairs
        .iter()
        .map(|(dish_id, quantity)| (dish_id.to_string(), *quantity))
        .collect()
}
