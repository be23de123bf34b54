use std::sync::Arc;

use async_trait::async_trait;
use models::db::MongoConnection;

/// Storage liveness, reported by the health endpoint.
#[async_trait]
pub trait StorageProbe: Send + Sync {
    async fn ping(&self) -> bool;
}

pub struct MongoProbe {
    conn: Arc<MongoConnection>,
}

impl MongoProbe {
    pub fn new(conn: Arc<MongoConnection>) -> Self { Self { conn } }
}

#[async_trait]
impl StorageProbe for MongoProbe {
    async fn ping(&self) -> bool {
        self.conn.ping().await
    }
}

/// Probe with a fixed answer, used with in-memory repositories.
pub struct StaticProbe(pub bool);

#[async_trait]
impl StorageProbe for StaticProbe {
    async fn ping(&self) -> bool {
        self.0
    }
}
