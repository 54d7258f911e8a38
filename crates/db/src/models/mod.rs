//! Row models and input DTOs.

pub mod client;
pub mod project;
pub mod task;
