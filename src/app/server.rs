use crate::adapters::clock::SystemClock;
use crate::adapters::http::{create_router, AppState};
use crate::adapters::storage::{MemoryStore, SqliteStore};
use crate::core::booking::AppointmentService;
use crate::core::{AppointmentStore, ConfigProvider};
use crate::utils::error::{Result, TerminError};
use axum::Router;
use std::sync::Arc;

pub async fn build_store<C: ConfigProvider>(config: &C) -> Result<Arc<dyn AppointmentStore>> {
    match config.database_backend() {
        "memory" => {
            tracing::warn!("Using the in-memory store; bookings are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        "sqlite" => {
            let store = SqliteStore::connect(config.database_url(), config.max_connections()).await?;
            tracing::info!("Connected to {}", config.database_url());
            Ok(Arc::new(store))
        }
        other => Err(TerminError::InvalidConfigValue {
            field: "database.backend".to_string(),
            value: other.to_string(),
            reason: "Allowed values: sqlite, memory".to_string(),
        }),
    }
}

/// Resolves the zone and opens the store. Both failures abort startup.
pub async fn build_service<C: ConfigProvider>(config: &C) -> Result<AppointmentService> {
    let clock = SystemClock::from_name(config.timezone())?;
    let store = build_store(config).await?;
    Ok(AppointmentService::new(Arc::new(clock), store))
}

pub struct TerminServer {
    router: Router,
    addr: String,
}

impl TerminServer {
    pub fn new(service: AppointmentService, available_days: usize, addr: String) -> Self {
        let router = create_router(AppState::new(service, available_days));
        Self { router, addr }
    }

    pub async fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let service = build_service(config).await?;
        tracing::info!("Shop clock runs in {}", service.timezone().name());
        Ok(Self::new(service, config.available_days(), config.listen_addr()))
    }

    pub async fn run(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        tracing::info!("Listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
