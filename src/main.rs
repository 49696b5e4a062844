use kermesse_pos::{
    api::{self, AppState},
    config::{ServerConfig, catalog, database},
    core::dish,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables can also be set externally
    dotenvy::dotenv().ok();

    // 3. Listener settings and the catalog file
    let server_config = ServerConfig::from_env()?;
    let catalog = catalog::load_config(&server_config.catalog_path)
        .inspect(|c| info!(teams = c.teams.len(), "Catalog configuration loaded"))
        .inspect_err(|e| error!("Failed to load catalog configuration: {}", e))?;

    // 4. Connect and make sure the schema exists
    let db = database::create_connection(&database::get_database_url())
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed the dishes on first run
    dish::seed_catalog(&db, &catalog.dishes)
        .await
        .inspect_err(|e| error!("Failed to seed initial dishes: {}", e))?;

    // 6. Serve
    let state = AppState::new(db, catalog);
    api::serve(state, &server_config.bind_address()).await
}
