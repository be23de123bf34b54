//! MongoDB connection management
//!
//! `MongoConnection` holds the database handle and hands out typed
//! collections. Timeouts come from `configs::DatabaseConfig`.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use configs::DatabaseConfig;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use once_cell::sync::Lazy;

pub static MONGODB_URI: Lazy<String> = Lazy::new(|| {
    // Load .env if present
    let _ = dotenvy::dotenv();
    env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
});

pub struct MongoConnection {
    database: Database,
}

impl MongoConnection {
    /// Connect and ping once so a bad URI or unreachable server fails at startup.
    pub async fn new(cfg: &DatabaseConfig) -> anyhow::Result<Self> {
        let options = Self::create_client_options(cfg).await?;
        let client = Client::with_options(options)?;
        let database = client.database(&cfg.name);

        database.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(database = %cfg.name, "connected to mongodb");

        Ok(Self { database })
    }

    /// Get a typed collection from the database.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> mongodb::Collection<T> {
        self.database.collection(name)
    }

    /// `true` when the server answers a ping.
    pub async fn ping(&self) -> bool {
        match self.database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "mongodb ping failed");
                false
            }
        }
    }

    async fn create_client_options(cfg: &DatabaseConfig) -> anyhow::Result<ClientOptions> {
        let timeout = Duration::from_secs(cfg.connect_timeout_secs);
        let mut options = ClientOptions::parse(&cfg.uri).await?;
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        if let Some(size) = cfg.max_pool_size {
            options.max_pool_size = Some(size);
        }
        options.app_name = Some("student-registry".to_string());
        Ok(options)
    }
}

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Arc<MongoConnection>> {
    Ok(Arc::new(MongoConnection::new(cfg).await?))
}

/// Connect using `MONGODB_URI`/`MONGODB_DB`; used by tests and tooling.
pub async fn connect_from_env() -> anyhow::Result<Arc<MongoConnection>> {
    let mut cfg = DatabaseConfig { uri: MONGODB_URI.clone(), ..DatabaseConfig::default() };
    cfg.normalize_from_env();
    cfg.validate()?;
    connect(&cfg).await
}
