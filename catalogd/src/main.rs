use std::fs::File;

use catalog_axum::{router, start_server};
use catalog_sqlite::Db;
use catalogd::{AppConfig, Cli, impls::CatalogApp};
use jwt_simple::prelude::HS256Key;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Everything in the workspace reports through `tracing`; RUST_LOG picks
    // what is written to stdio.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI args and extract the JWT key
    let cli = Cli::import()?;
    let key = HS256Key::from_bytes(cli.secret.as_bytes());

    // Create config with proper layering of CLI args
    let AppConfig {
        server,
        database,
        auth,
    } = AppConfig::load(&cli)?;
    tracing::debug!(?server, ?database, ?auth, "loaded configuration");

    let db = Db::open(&database).await?;
    let app = CatalogApp { db, key, auth };

    // If requested, dump the schema and exit.
    if let Some(path) = cli.schema {
        let schema = router(app, server).1;
        serde_json::to_writer_pretty(File::create(path)?, &schema)?;
        return Ok(());
    }

    start_server(server, app).await?;
    Ok(())
}
