//! # DevConnector Shared Library
//!
//! Types and database access used by the DevConnector API server.
//!
//! ## Module Organization
//!
//! - `auth`: JWT validation and the identity middleware
//! - `db`: Connection pool and schema migrations
//! - `models`: Users, profiles and experience entries

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
