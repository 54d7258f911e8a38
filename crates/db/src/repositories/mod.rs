//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every read excludes
//! archived rows.

pub mod client_repo;
pub mod project_repo;
pub mod task_repo;

pub use client_repo::ClientRepo;
pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
