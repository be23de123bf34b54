//! Cross-entity capabilities.
//!
//! Students reference groups by id only. The student service depends on this
//! trait rather than on the group module, so either side can be swapped out.

use async_trait::async_trait;

use crate::errors::ServiceError;

#[async_trait]
pub trait GroupExistenceChecker: Send + Sync {
    /// Fails with `BadRequest` for a malformed id, otherwise reports presence.
    async fn group_exists(&self, id: &str) -> Result<bool, ServiceError>;
}

/// Fixed-answer checker for tests.
pub mod stub {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub struct StubGroupChecker {
        answer: bool,
        calls: AtomicUsize,
    }

    impl StubGroupChecker {
        pub fn new(answer: bool) -> Self {
            Self { answer, calls: AtomicUsize::new(0) }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GroupExistenceChecker for StubGroupChecker {
        async fn group_exists(&self, id: &str) -> Result<bool, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !models::ids::is_id_valid(id) {
                return Err(ServiceError::BadRequest(format!("Group id {} is invalid", id)));
            }
            Ok(self.answer)
        }
    }
}
