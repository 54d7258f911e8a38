//! ClientDesk API server library.
//!
//! Exposes config, state, error handling, mutation operations and routes so
//! integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod mutations;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
