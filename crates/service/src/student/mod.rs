//! Student module: three-layer architecture (domain, repository, service).
//!
//! Students reference groups through `relations::GroupExistenceChecker`.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::StudentService;
