//! Service layer providing business-oriented operations on groups and students.
//! - Separates business logic from data access (repository traits per entity).
//! - Reuses validation and document definitions in the `models` crate.
//! - Ships MongoDB repositories plus in-memory mocks for tests.

pub mod errors;
pub mod pagination;
pub mod relations;
pub mod health;
pub mod group;
pub mod student;
#[cfg(test)]
pub mod test_support;

pub use group::GroupService;
pub use student::StudentService;
