//! # DevConnector API Server Library
//!
//! HTTP API for developer profiles and their work experience.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Request body extraction
//! - `middleware`: Response middleware (security headers)
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
