use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Field-level constraint violation (name too short, future birth date, ...).
    #[error("{0}")]
    Validation(String),
    /// Malformed identifier or a referenced group that does not exist.
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn invalid_id(id: &str) -> Self {
        Self::BadRequest(format!("id {} is not valid", id))
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::BadRequest(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Db(_) => 1200,
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

impl From<mongodb::error::Error> for ServiceError {
    fn from(err: mongodb::error::Error) -> Self {
        ServiceError::Db(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_keep_their_category() {
        let e: ServiceError = ModelError::Validation("Group validation failed: x".into()).into();
        assert!(matches!(e, ServiceError::Validation(ref m) if m == "Group validation failed: x"));
        let e: ServiceError = ModelError::Db("down".into()).into();
        assert_eq!(e.code(), 1200);
    }

    #[test]
    fn invalid_id_message() {
        assert_eq!(ServiceError::invalid_id("abc").to_string(), "id abc is not valid");
    }
}
