//! ServerBuilder for fluent API to build the dashboard server

use super::handlers::AppState;
use super::router::build_routes;
use crate::actions::InvoiceActions;
use crate::config::AppConfig;
use crate::core::auth::{Authenticator, CredentialsProvider};
use crate::core::cache::ViewCache;
use crate::core::events::EventBus;
use crate::core::service::InvoiceStore;
use anyhow::Result;
use axum::Router;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the invoice dashboard server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(AppConfig::from_yaml_file("config/dashboard.yaml")?)
///     .with_store(InMemoryInvoiceStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    store: Option<Arc<dyn InvoiceStore>>,
    authenticator: Option<Arc<dyn Authenticator>>,
    event_bus: Option<EventBus>,
    clock: Option<Arc<dyn Fn() -> NaiveDate + Send + Sync>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            store: None,
            authenticator: None,
            event_bus: None,
            clock: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the invoice store (required)
    pub fn with_store(mut self, store: impl InvoiceStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Replace the credentials provider built from `auth.users`
    pub fn with_authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    /// Broadcast every view revalidation
    ///
    /// # Arguments
    ///
    /// * `capacity` - Buffer size for the broadcast channel (recommended: 1024)
    pub fn with_event_bus(mut self, capacity: usize) -> Self {
        self.event_bus = Some(EventBus::new(capacity));
        self
    }

    /// Date new invoices with `clock` instead of today's UTC date
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Add routes outside the invoice actions
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Wire the store, authenticator and view cache into the handler state
    ///
    /// The view cache is the revalidator the actions use, so a successful write
    /// invalidates the listing the server renders.
    pub fn build_state(&mut self) -> Result<AppState> {
        self.config.validate()?;

        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("InvoiceStore is required. Call .with_store()"))?;

        let authenticator: Arc<dyn Authenticator> = match self.authenticator.take() {
            Some(authenticator) => authenticator,
            None => Arc::new(CredentialsProvider::new(self.config.auth.users.clone())),
        };

        let mut views = ViewCache::new();
        if let Some(bus) = self.event_bus.take() {
            views = views.with_event_bus(bus);
        }

        let mut actions =
            InvoiceActions::from_config(store, Arc::new(views.clone()), authenticator, &self.config);
        if let Some(clock) = self.clock.take() {
            actions = actions.with_clock(move || clock());
        }

        tracing::debug!(
            listing_path = actions.listing_path(),
            delete_enabled = self.config.invoices.delete_enabled,
            "server state ready"
        );

        Ok(AppState {
            actions,
            views,
            sign_in_redirect: Arc::from(self.config.auth.redirect_to.as_str()),
        })
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;
        let mut app = build_routes(state);
        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }
        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.bind` from the configuration and handles SIGTERM and
    /// Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
