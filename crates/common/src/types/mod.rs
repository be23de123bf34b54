use serde::{Deserialize, Serialize};

/// Storage liveness as reported by `GET /api/health`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub passed: bool,
}

/// Body returned by `GET /api/ping`.
pub const PONG: &str = "PONG";

/// Body returned after creating a resource.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreatedId {
    pub id: String,
}
