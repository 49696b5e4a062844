//! Database configuration module.
//!
//! Handles the store connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust models without hand-written SQL.
//! Both `SQLite` and `PostgreSQL` URLs are accepted.

use crate::entities::{Dish, SaleLine};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info, instrument};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/kermesse.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or
/// returns the default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Opens the connection pool for the given URL.
///
/// The returned handle is cheap to clone and is shared by all request
/// handlers; each query or transaction checks out its own connection.
#[instrument(skip(database_url))]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database");
    let db = Database::connect(database_url).await?;
    info!(backend = ?db.get_database_backend(), "Database connection opened");
    Ok(db)
}

/// Creates the `dishes` and `sale_lines` tables if they do not exist yet.
///
/// `dishes` is created first because `sale_lines` references it.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, Dish).await?;
    create_table(db, SaleLine).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(builder.build(&statement)).await?;
    Ok(())
}
