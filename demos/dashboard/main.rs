//! Invoice dashboard server
//!
//! This example demonstrates:
//! - Loading `AppConfig` from YAML (path as first argument, defaults otherwise)
//! - Choosing the store: PostgreSQL when built with `--features postgres` and
//!   `database.url` is set, in-memory otherwise
//! - Serving the invoice form actions with graceful shutdown
//!
//! ```sh
//! cargo run --example dashboard -- demos/dashboard/dashboard.yaml
//! curl -i -d 'customerId=3958dc9e-712f-4377-85e9-fec4b6a6442a&amount=42.50&status=pending' \
//!     http://127.0.0.1:3000/dashboard/invoices/create
//! ```

use invoices::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("invoices=debug,tower_http=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(path = %path, "loading configuration");
            AppConfig::from_yaml_file(&path)?
        }
        None => AppConfig::default(),
    };

    if config.auth.users.is_empty() {
        tracing::warn!("no users configured; every sign-in will be rejected");
    }

    let builder = ServerBuilder::new()
        .with_config(config.clone())
        .with_event_bus(1024);

    let builder = with_configured_store(builder, &config).await?;

    builder.serve().await
}

#[cfg(feature = "postgres")]
async fn with_configured_store(builder: ServerBuilder, config: &AppConfig) -> Result<ServerBuilder> {
    match &config.database.url {
        Some(url) => {
            let store = PostgresInvoiceStore::connect(url, config.database.max_connections).await?;
            // Demo setup only: the store itself never creates its table
            sqlx::migrate!("./migrations").run(store.pool()).await?;
            tracing::info!("using PostgreSQL invoice store");
            Ok(builder.with_store(store))
        }
        None => Ok(with_in_memory_store(builder)),
    }
}

#[cfg(not(feature = "postgres"))]
async fn with_configured_store(builder: ServerBuilder, config: &AppConfig) -> Result<ServerBuilder> {
    if config.database.url.is_some() {
        tracing::warn!("database.url is set but the postgres feature is disabled");
    }
    Ok(with_in_memory_store(builder))
}

fn with_in_memory_store(builder: ServerBuilder) -> ServerBuilder {
    tracing::info!("using in-memory invoice store");
    builder.with_store(InMemoryInvoiceStore::new())
}
