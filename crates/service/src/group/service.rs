use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::domain::{GroupCreateInput, GroupView, NewGroup};
use super::repository::GroupRepository;
use crate::errors::ServiceError;
use crate::relations::GroupExistenceChecker;

/// Group business service independent of web framework and storage engine.
pub struct GroupService<R: GroupRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: GroupRepository + ?Sized> GroupService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<GroupView>, ServiceError> {
        let groups = self.repo.list().await?;
        debug!(count = groups.len(), "groups_listed");
        Ok(groups.into_iter().map(GroupView::from).collect())
    }

    /// Validate and insert a group, returning its id.
    ///
    /// # Examples
    /// ```
    /// use service::group::{GroupService, domain::GroupCreateInput, repository::mock::MockGroupRepository};
    /// use std::sync::Arc;
    /// let svc = GroupService::new(Arc::new(MockGroupRepository::default()));
    /// let input = GroupCreateInput { name: Some("CS".into()), start_year: Some(2024) };
    /// let id = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(id.len(), 24);
    /// ```
    #[instrument(skip(self, input), fields(name = ?input.name, start_year = ?input.start_year))]
    pub async fn create(&self, input: GroupCreateInput) -> Result<String, ServiceError> {
        models::group::validate(input.name.as_deref(), input.start_year)?;
        let (Some(name), Some(start_year)) = (input.name, input.start_year) else {
            return Err(ServiceError::Validation("Group validation failed".into()));
        };
        let id = self.repo.create(NewGroup { name, start_year }).await?;
        info!(group_id = %id, "group_created");
        Ok(id)
    }

    /// Report whether a group exists. Malformed ids fail before storage is queried.
    pub async fn exists(&self, id: &str) -> Result<bool, ServiceError> {
        let Some(id) = models::ids::normalize_id(id) else {
            return Err(ServiceError::BadRequest(format!("Group id {} is invalid", id)));
        };
        self.repo.exists(&id).await
    }
}

#[async_trait]
impl<R: GroupRepository + ?Sized> GroupExistenceChecker for GroupService<R> {
    async fn group_exists(&self, id: &str) -> Result<bool, ServiceError> {
        self.exists(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::domain::Group;
    use crate::group::repository::mock::MockGroupRepository;

    fn service_with(groups: Vec<Group>) -> (GroupService<MockGroupRepository>, Arc<MockGroupRepository>) {
        let repo = Arc::new(MockGroupRepository::with_groups(groups));
        (GroupService::new(repo.clone()), repo)
    }

    fn input(name: Option<&str>, start_year: Option<i32>) -> GroupCreateInput {
        GroupCreateInput { name: name.map(str::to_string), start_year }
    }

    #[tokio::test]
    async fn list_passes_every_field_through() {
        let (svc, repo) = service_with(vec![
            Group { id: "507f1f77bcf86cd799439011".into(), name: "Group 1".into(), start_year: 2025 },
            Group { id: "507f1f77bcf86cd799439012".into(), name: "Group 2".into(), start_year: 2024 },
        ]);
        let result = svc.list().await.unwrap();
        assert_eq!(repo.calls(), vec!["list"]);
        assert_eq!(result.len(), 2);
        assert_eq!(
            result[0],
            GroupView { id: "507f1f77bcf86cd799439011".into(), name: "Group 1".into(), start_year: 2025 }
        );
    }

    #[tokio::test]
    async fn list_of_empty_store_is_empty() {
        let (svc, _) = service_with(vec![]);
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_returns_id_of_stored_group() {
        let (svc, _) = service_with(vec![]);
        let id = svc.create(input(Some("New Group"), Some(2022))).await.unwrap();
        let groups = svc.list().await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, id);
        assert_eq!(groups[0].name, "New Group");
    }

    #[tokio::test]
    async fn create_succeeds_iff_constraints_hold() {
        let cases = [
            (Some("CS"), Some(2020), true),
            (Some("C"), Some(2024), false),
            (Some(""), Some(2024), false),
            (Some("CS"), Some(2019), false),
            (None, Some(2024), false),
            (Some("CS"), None, false),
        ];
        for (name, year, ok) in cases {
            let (svc, repo) = service_with(vec![]);
            let result = svc.create(input(name, year)).await;
            assert_eq!(result.is_ok(), ok, "name={:?} year={:?}", name, year);
            if !ok {
                assert!(matches!(result, Err(ServiceError::Validation(_))));
                assert!(repo.calls().is_empty(), "invalid group must not reach storage");
            }
        }
    }

    #[tokio::test]
    async fn exists_rejects_malformed_id_without_querying() {
        let (svc, repo) = service_with(vec![]);
        let err = svc.exists("invalid-id").await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(ref m) if m == "Group id invalid-id is invalid"));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn exists_reports_presence() {
        let id = "507f1f77bcf86cd799439011";
        let (svc, repo) = service_with(vec![Group { id: id.into(), name: "CS".into(), start_year: 2024 }]);
        assert!(svc.exists(id).await.unwrap());
        assert!(!svc.exists("507f1f77bcf86cd799439012").await.unwrap());
        assert_eq!(repo.calls(), vec!["exists", "exists"]);
    }

    #[tokio::test]
    async fn exists_ignores_hex_case() {
        let id = "507f1f77bcf86cd799439011";
        let (svc, _) = service_with(vec![Group { id: id.into(), name: "CS".into(), start_year: 2024 }]);
        assert!(svc.exists(&id.to_ascii_uppercase()).await.unwrap());
    }

    #[tokio::test]
    async fn acts_as_existence_checker() {
        let (svc, _) = service_with(vec![]);
        let checker: Arc<dyn GroupExistenceChecker> = Arc::new(svc);
        assert!(!checker.group_exists("507f1f77bcf86cd799439011").await.unwrap());
    }
}
