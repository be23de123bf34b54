use async_trait::async_trait;

use super::domain::{Group, NewGroup};
use crate::errors::ServiceError;

/// Repository abstraction for group persistence.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Group>, ServiceError>;
    /// Insert and return the new id.
    async fn create(&self, group: NewGroup) -> Result<String, ServiceError>;
    async fn exists(&self, id: &str) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockGroupRepository {
        groups: Mutex<Vec<Group>>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl MockGroupRepository {
        pub fn with_groups(groups: Vec<Group>) -> Self {
            Self { groups: Mutex::new(groups), calls: Mutex::default() }
        }

        /// Names of the repository methods called so far, in order.
        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl GroupRepository for MockGroupRepository {
        async fn list(&self) -> Result<Vec<Group>, ServiceError> {
            self.record("list");
            Ok(self.groups.lock().unwrap().clone())
        }

        async fn create(&self, group: NewGroup) -> Result<String, ServiceError> {
            self.record("create");
            let id = models::ids::new_id();
            self.groups.lock().unwrap().push(Group {
                id: id.clone(),
                name: group.name,
                start_year: group.start_year,
            });
            Ok(id)
        }

        async fn exists(&self, id: &str) -> Result<bool, ServiceError> {
            self.record("exists");
            Ok(self.groups.lock().unwrap().iter().any(|g| g.id == id))
        }
    }
}
