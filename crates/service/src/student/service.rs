use std::sync::Arc;

use models::ids::normalize_id;
use tracing::{debug, info, instrument, warn};

use super::domain::{
    Address, NewStudent, StudentCreateInput, StudentDetails, StudentFilter, StudentInfo, StudentPatch,
    StudentQuery, StudentUpdateInput,
};
use super::repository::StudentRepository;
use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::relations::GroupExistenceChecker;

/// Student business service: id checks, group references and view shaping.
pub struct StudentService<R, G>
where
    R: StudentRepository + ?Sized,
    G: GroupExistenceChecker + ?Sized,
{
    repo: Arc<R>,
    groups: Arc<G>,
}

/// Canonical (lowercase) id, or `BadRequest` when malformed.
fn ensure_id(id: &str) -> Result<String, ServiceError> {
    normalize_id(id).ok_or_else(|| ServiceError::invalid_id(id))
}

impl<R, G> StudentService<R, G>
where
    R: StudentRepository + ?Sized,
    G: GroupExistenceChecker + ?Sized,
{
    pub fn new(repo: Arc<R>, groups: Arc<G>) -> Self { Self { repo, groups } }

    pub async fn get(&self, id: &str) -> Result<StudentDetails, ServiceError> {
        let key = ensure_id(id)?;
        let student = self
            .repo
            .get(&key)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Student with id {} not found.", id)))?;
        Ok(StudentDetails::from(student))
    }

    /// Validate, check the referenced group and insert.
    ///
    /// # Examples
    /// ```
    /// use service::student::{StudentService, domain::StudentCreateInput, repository::mock::MockStudentRepository};
    /// use service::relations::stub::StubGroupChecker;
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(MockStudentRepository::default()), Arc::new(StubGroupChecker::new(true)));
    /// let input = StudentCreateInput {
    ///     name: "Ann".into(),
    ///     surname: "Lee".into(),
    ///     group_id: "507f1f77bcf86cd799439011".into(),
    ///     birth_date: chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
    ///     phone_numbers: None,
    ///     address: None,
    /// };
    /// let id = tokio_test::block_on(svc.create(input)).unwrap();
    /// let details = tokio_test::block_on(svc.get(&id)).unwrap();
    /// assert_eq!(details.name, "Ann");
    /// ```
    #[instrument(skip(self, input), fields(group_id = %input.group_id))]
    pub async fn create(&self, input: StudentCreateInput) -> Result<String, ServiceError> {
        models::student::validate_new(&input.fields(), models::student::today())?;
        let group_id = self.validate_group_id(&input.group_id).await?;

        let address = input.address.map(Address::try_from).transpose()?;
        let id = self
            .repo
            .create(NewStudent {
                name: input.name,
                surname: input.surname,
                group_id,
                birth_date: input.birth_date,
                phone_numbers: input.phone_numbers,
                address,
            })
            .await?;
        info!(student_id = %id, "student_created");
        Ok(id)
    }

    #[instrument(skip(self, id, input), fields(student_id = %id))]
    pub async fn update(&self, id: &str, input: StudentUpdateInput) -> Result<(), ServiceError> {
        let key = ensure_id(id)?;
        models::student::validate_patch(&input.fields(), models::student::today())?;
        let group_id = match input.group_id.as_deref() {
            Some(group_id) => Some(self.validate_group_id(group_id).await?),
            None => None,
        };

        let patch = StudentPatch {
            name: input.name,
            surname: input.surname,
            group_id,
            birth_date: input.birth_date,
            phone_numbers: input.phone_numbers,
            address: input.address.map(Address::try_from).transpose()?,
        };
        if patch.is_empty() {
            debug!("empty student patch");
        }
        self.repo.update(&key, patch).await?;
        info!("student_updated");
        Ok(())
    }

    pub async fn list_by_group_id(&self, group_id: &str) -> Result<Vec<StudentInfo>, ServiceError> {
        let group_id = ensure_id(group_id)?;
        let students = self.repo.filter(&StudentFilter::by_group(&group_id), Pagination::default()).await?;
        Ok(students.into_iter().map(StudentInfo::from).collect())
    }

    pub async fn search(&self, mut query: StudentQuery) -> Result<Vec<StudentInfo>, ServiceError> {
        if let Some(group_id) = query.group_id.as_deref().filter(|g| !g.is_empty()) {
            query.group_id = Some(ensure_id(group_id)?);
        }
        let filter = StudentFilter::from_query(&query);
        let page = Pagination::new(query.skip, query.limit);
        let students = self.repo.filter(&filter, page).await?;
        debug!(?filter, count = students.len(), "students_searched");
        Ok(students.into_iter().map(StudentInfo::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let key = ensure_id(id)?;
        self.repo.delete(&key).await?;
        info!(student_id = %id, "student_deleted");
        Ok(())
    }

    /// Returns the canonical form of a group id that refers to an existing group.
    async fn validate_group_id(&self, id: &str) -> Result<String, ServiceError> {
        if !self.groups.group_exists(id).await? {
            warn!(group_id = %id, "referenced group missing");
            return Err(ServiceError::BadRequest(format!("Group with id {} doesn't exists.", id)));
        }
        ensure_id(id)
    }
}
