//! MongoDB student repository.
//!
//! `groupId` is stored as an ObjectId reference; calendar dates as midnight UTC.
//! Results are ordered by `_id`, which follows insertion time.

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use models::db::MongoConnection;
use models::student::{date_from_bson, date_to_bson, timestamp_from_bson, AddressDocument, StudentDocument, COLLECTION};
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use mongodb::options::FindOptions;
use mongodb::Collection;

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::student::domain::{Address, NewStudent, Student, StudentFilter, StudentPatch};
use crate::student::repository::StudentRepository;

impl From<Address> for AddressDocument {
    fn from(a: Address) -> Self {
        Self { country: a.country, town: a.town, address_string: a.address_string }
    }
}

impl From<AddressDocument> for Address {
    fn from(a: AddressDocument) -> Self {
        Self { country: a.country, town: a.town, address_string: a.address_string }
    }
}

impl TryFrom<StudentDocument> for Student {
    type Error = ServiceError;

    fn try_from(doc: StudentDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: doc.id.to_hex(),
            name: doc.name,
            surname: doc.surname,
            group_id: doc.group_id.to_hex(),
            birth_date: date_from_bson(doc.birth_date)?,
            phone_numbers: doc.phone_numbers,
            address: doc.address.map(Address::from),
            created_at: timestamp_from_bson(doc.created_at),
            updated_at: timestamp_from_bson(doc.updated_at),
        })
    }
}

fn object_id(id: &str) -> Result<ObjectId, ServiceError> {
    models::ids::parse_id(id).ok_or_else(|| ServiceError::invalid_id(id))
}

fn to_bson<T: serde::Serialize>(value: &T) -> Result<bson::Bson, ServiceError> {
    bson::to_bson(value).map_err(|e| ServiceError::Db(e.to_string()))
}

/// `$set` body for a patch; `updatedAt` is always refreshed.
fn set_document(patch: StudentPatch) -> Result<Document, ServiceError> {
    let mut set = Document::new();
    if let Some(name) = patch.name {
        set.insert("name", name);
    }
    if let Some(surname) = patch.surname {
        set.insert("surname", surname);
    }
    if let Some(group_id) = patch.group_id {
        set.insert("groupId", object_id(&group_id)?);
    }
    if let Some(birth_date) = patch.birth_date {
        set.insert("birthDate", date_to_bson(birth_date));
    }
    if let Some(phone_numbers) = patch.phone_numbers {
        set.insert("phoneNumbers", phone_numbers);
    }
    if let Some(address) = patch.address {
        set.insert("address", to_bson(&AddressDocument::from(address))?);
    }
    set.insert("updatedAt", bson::DateTime::now());
    Ok(set)
}

/// Exact-match filter document. A malformed group id cannot match anything.
fn filter_document(filter: &StudentFilter) -> Option<Document> {
    let mut query = Document::new();
    if let Some(name) = &filter.name {
        query.insert("name", name.as_str());
    }
    if let Some(surname) = &filter.surname {
        query.insert("surname", surname.as_str());
    }
    if let Some(group_id) = &filter.group_id {
        query.insert("groupId", models::ids::parse_id(group_id)?);
    }
    Some(query)
}

pub struct MongoStudentRepository {
    collection: Collection<StudentDocument>,
}

impl MongoStudentRepository {
    pub fn new(conn: Arc<MongoConnection>) -> Self {
        Self { collection: conn.collection(COLLECTION) }
    }
}

#[async_trait]
impl StudentRepository for MongoStudentRepository {
    async fn get(&self, id: &str) -> Result<Option<Student>, ServiceError> {
        let Some(oid) = models::ids::parse_id(id) else {
            return Ok(None);
        };
        let found = self.collection.find_one(doc! { "_id": oid }).await?;
        found.map(Student::try_from).transpose()
    }

    async fn create(&self, student: NewStudent) -> Result<String, ServiceError> {
        let now = bson::DateTime::now();
        let document = StudentDocument {
            id: ObjectId::new(),
            name: student.name,
            surname: student.surname,
            group_id: object_id(&student.group_id)?,
            birth_date: date_to_bson(student.birth_date),
            phone_numbers: student.phone_numbers,
            address: student.address.map(AddressDocument::from),
            created_at: now,
            updated_at: now,
        };
        self.collection.insert_one(&document).await?;
        Ok(document.id.to_hex())
    }

    async fn update(&self, id: &str, patch: StudentPatch) -> Result<(), ServiceError> {
        let Some(oid) = models::ids::parse_id(id) else {
            return Ok(());
        };
        let set = set_document(patch)?;
        self.collection.update_one(doc! { "_id": oid }, doc! { "$set": set }).await?;
        Ok(())
    }

    async fn filter(&self, filter: &StudentFilter, page: Pagination) -> Result<Vec<Student>, ServiceError> {
        let Some(query) = filter_document(filter) else {
            return Ok(Vec::new());
        };
        let (skip, limit) = page.normalize();
        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .skip(skip)
            .limit(limit)
            .build();

        let cursor = self.collection.find(query).with_options(options).await?;
        let docs: Vec<StudentDocument> = cursor.try_collect().await?;
        docs.into_iter().map(Student::try_from).collect()
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let Some(oid) = models::ids::parse_id(id) else {
            return Ok(());
        };
        self.collection.delete_one(doc! { "_id": oid }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_mongo;
    use chrono::NaiveDate;

    fn new_student(name: &str, surname: &str, group_id: &str) -> NewStudent {
        NewStudent {
            name: name.into(),
            surname: surname.into(),
            group_id: group_id.into(),
            birth_date: NaiveDate::from_ymd_opt(1988, 1, 30).unwrap(),
            phone_numbers: None,
            address: None,
        }
    }

    #[test]
    fn filter_document_only_holds_present_criteria() {
        let gid = models::ids::new_id();
        let doc = filter_document(&StudentFilter { name: Some("John".into()), group_id: Some(gid.clone()), surname: None }).unwrap();
        assert_eq!(doc.get_str("name").unwrap(), "John");
        assert!(doc.get("surname").is_none());
        assert_eq!(doc.get_object_id("groupId").unwrap().to_hex(), gid);
        assert!(filter_document(&StudentFilter::default()).unwrap().is_empty());
        assert!(filter_document(&StudentFilter::by_group("nope")).is_none());
    }

    #[test]
    fn set_document_only_holds_supplied_fields() {
        let set = set_document(StudentPatch { surname: Some("Kim".into()), ..StudentPatch::default() }).unwrap();
        assert_eq!(set.get_str("surname").unwrap(), "Kim");
        assert!(set.get("name").is_none());
        assert!(set.get("address").is_none());
        assert!(set.get_datetime("updatedAt").is_ok());
    }

    #[tokio::test]
    async fn crud_and_filter() -> Result<(), anyhow::Error> {
        let Some(conn) = get_mongo().await else { return Ok(()) };
        let repo = MongoStudentRepository::new(conn);
        let group = models::ids::new_id();
        let other = models::ids::new_id();

        let john = repo.create(new_student("John", "Doe", &group)).await?;
        repo.create(new_student("John", "Smith", &other)).await?;
        repo.create(new_student("Jane", "Doe", &group)).await?;

        let found = repo.get(&john).await?.expect("stored student");
        assert_eq!(found.group_id, group);
        assert_eq!(found.birth_date, NaiveDate::from_ymd_opt(1988, 1, 30).unwrap());

        let all = repo.filter(&StudentFilter::default(), Pagination::default()).await?;
        assert_eq!(all.len(), 3);
        let in_group = repo.filter(&StudentFilter::by_group(&group), Pagination::default()).await?;
        assert_eq!(in_group.len(), 2);
        let page = repo.filter(&StudentFilter::default(), Pagination::new(Some(1), Some(1))).await?;
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].surname, "Smith");

        repo.update(
            &john,
            StudentPatch {
                phone_numbers: Some(vec!["555".into()]),
                address: Some(Address { country: "UK".into(), town: "York".into(), address_string: "1 High St".into() }),
                ..StudentPatch::default()
            },
        )
        .await?;
        let updated = repo.get(&john).await?.expect("updated student");
        assert_eq!(updated.name, "John");
        assert_eq!(updated.phone_numbers, Some(vec!["555".to_string()]));
        assert_eq!(updated.address.map(|a| a.town), Some("York".to_string()));

        repo.delete(&john).await?;
        assert!(repo.get(&john).await?.is_none());
        repo.delete(&john).await?;
        Ok(())
    }
}
