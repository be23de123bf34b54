pub mod errors;
pub mod db;
pub mod ids;
pub mod validation;
pub mod group;
pub mod student;

#[cfg(test)]
mod db_tests {
    use crate::db;

    #[tokio::test]
    async fn connect_and_ping() {
        if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("MONGODB_URI").is_err() {
            eprintln!("skip: MONGODB_URI not set");
            return;
        }
        let conn = match db::connect_from_env().await {
            Ok(c) => c,
            Err(e) => {
                eprintln!("skip: cannot connect to mongodb: {}", e);
                return;
            }
        };
        assert!(conn.ping().await);
    }
}
