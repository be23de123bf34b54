use async_trait::async_trait;

use super::domain::{NewStudent, Student, StudentFilter, StudentPatch};
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Repository abstraction for student persistence.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Student>, ServiceError>;
    /// Insert and return the new id.
    async fn create(&self, student: NewStudent) -> Result<String, ServiceError>;
    /// Write only the fields present in `patch`. Unknown ids are a no-op.
    async fn update(&self, id: &str, patch: StudentPatch) -> Result<(), ServiceError>;
    async fn filter(&self, filter: &StudentFilter, page: Pagination) -> Result<Vec<Student>, ServiceError>;
    /// Remove a student; deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockStudentRepository {
        students: Mutex<Vec<Student>>, // insertion order
        calls: Mutex<Vec<&'static str>>,
    }

    impl MockStudentRepository {
        pub fn with_students(students: Vec<Student>) -> Self {
            Self { students: Mutex::new(students), calls: Mutex::default() }
        }

        /// Names of the repository methods called so far, in order.
        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        /// Snapshot of the stored records, bookkeeping fields included.
        pub fn stored(&self) -> Vec<Student> {
            self.students.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl StudentRepository for MockStudentRepository {
        async fn get(&self, id: &str) -> Result<Option<Student>, ServiceError> {
            self.record("get");
            Ok(self.students.lock().unwrap().iter().find(|s| s.id == id).cloned())
        }

        async fn create(&self, student: NewStudent) -> Result<String, ServiceError> {
            self.record("create");
            let id = models::ids::new_id();
            let now = Utc::now();
            self.students.lock().unwrap().push(Student {
                id: id.clone(),
                name: student.name,
                surname: student.surname,
                group_id: student.group_id,
                birth_date: student.birth_date,
                phone_numbers: student.phone_numbers,
                address: student.address,
                created_at: now,
                updated_at: now,
            });
            Ok(id)
        }

        async fn update(&self, id: &str, patch: StudentPatch) -> Result<(), ServiceError> {
            self.record("update");
            let mut students = self.students.lock().unwrap();
            if let Some(student) = students.iter_mut().find(|s| s.id == id) {
                patch.apply_to(student);
                student.updated_at = Utc::now();
            }
            Ok(())
        }

        async fn filter(&self, filter: &StudentFilter, page: Pagination) -> Result<Vec<Student>, ServiceError> {
            self.record("filter");
            let students = self.students.lock().unwrap();
            Ok(page.apply(students.iter().filter(|s| filter.matches(s)).cloned()))
        }

        async fn delete(&self, id: &str) -> Result<(), ServiceError> {
            self.record("delete");
            self.students.lock().unwrap().retain(|s| s.id != id);
            Ok(())
        }
    }
}
