#![cfg(test)]
use std::sync::Arc;

use configs::DatabaseConfig;
use models::db::{connect, MongoConnection, MONGODB_URI};

/// Connect to a throwaway database, or `None` when no MongoDB is configured.
pub async fn get_mongo() -> Option<Arc<MongoConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("MONGODB_URI").is_err() {
        eprintln!("skip: MONGODB_URI not set");
        return None;
    }
    let cfg = DatabaseConfig {
        uri: MONGODB_URI.clone(),
        name: format!("students_test_{}", models::ids::new_id()),
        ..DatabaseConfig::default()
    };
    match connect(&cfg).await {
        Ok(conn) => Some(conn),
        Err(e) => {
            eprintln!("skip: cannot connect to mongodb: {}", e);
            None
        }
    }
}
