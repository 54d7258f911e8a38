//! Domain logic for the client dashboard.
//!
//! Nothing in this crate touches the database: callers load rows and pass
//! them in, so every function here is a pure transformation.

pub mod error;
pub mod export;
pub mod mutation;
pub mod normalize;
pub mod stats;
pub mod status;
pub mod table;
pub mod types;
pub mod validation;
