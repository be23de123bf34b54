//! MongoDB group repository.

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use models::db::MongoConnection;
use models::group::{GroupDocument, COLLECTION};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Collection;

use crate::errors::ServiceError;
use crate::group::domain::{Group, NewGroup};
use crate::group::repository::GroupRepository;

impl From<GroupDocument> for Group {
    fn from(doc: GroupDocument) -> Self {
        Self { id: doc.id.to_hex(), name: doc.name, start_year: doc.start_year }
    }
}

pub struct MongoGroupRepository {
    collection: Collection<GroupDocument>,
}

impl MongoGroupRepository {
    pub fn new(conn: Arc<MongoConnection>) -> Self {
        Self { collection: conn.collection(COLLECTION) }
    }
}

#[async_trait]
impl GroupRepository for MongoGroupRepository {
    async fn list(&self) -> Result<Vec<Group>, ServiceError> {
        let cursor = self.collection.find(doc! {}).await?;
        let docs: Vec<GroupDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Group::from).collect())
    }

    async fn create(&self, group: NewGroup) -> Result<String, ServiceError> {
        let document = GroupDocument {
            id: ObjectId::new(),
            name: group.name,
            start_year: group.start_year,
        };
        self.collection.insert_one(&document).await?;
        Ok(document.id.to_hex())
    }

    async fn exists(&self, id: &str) -> Result<bool, ServiceError> {
        let Some(oid) = models::ids::parse_id(id) else {
            return Ok(false);
        };
        let count = self.collection.count_documents(doc! { "_id": oid }).await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_mongo;

    #[tokio::test]
    async fn create_list_and_exists() -> Result<(), anyhow::Error> {
        let Some(conn) = get_mongo().await else { return Ok(()) };
        let repo = MongoGroupRepository::new(conn);

        assert!(repo.list().await?.is_empty());

        let id = repo.create(NewGroup { name: "Test Group".into(), start_year: 2022 }).await?;
        let groups = repo.list().await?;
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, id);
        assert_eq!(groups[0].name, "Test Group");
        assert_eq!(groups[0].start_year, 2022);

        assert!(repo.exists(&id).await?);
        assert!(!repo.exists(&models::ids::new_id()).await?);
        Ok(())
    }
}
