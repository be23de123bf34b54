use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::group::repo::mongo::MongoGroupRepository;
use service::health::MongoProbe;
use service::student::repo::mongo::MongoStudentRepository;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` (or `CONFIG_PATH`) first, then environment variables only.
pub fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(file_err) => {
            warn!(error = %file_err, "config file unusable, falling back to environment");
            AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
        }
    }
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Router over MongoDB-backed services.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let conn = models::db::connect(&cfg.database)
        .await
        .map_err(|e| StartupError::Storage(e.to_string()))?;

    let state = ServerState::new(
        Arc::new(MongoGroupRepository::new(Arc::clone(&conn))),
        Arc::new(MongoStudentRepository::new(Arc::clone(&conn))),
        Arc::new(MongoProbe::new(conn)),
    );
    Ok(routes::build_router(state, build_cors()))
}

/// Router over empty in-memory repositories.
pub fn build_app_in_memory() -> Router {
    routes::build_router(ServerState::in_memory(), build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl_c");
        return;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, database = %cfg.database.name, "starting student registry");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
