//! # Taskdeck Shared Library
//!
//! Shared types and business logic for the taskdeck API server: the
//! authentication subsystem and the persistence layer.
//!
//! ## Module Organization
//!
//! - `auth`: password hashing, bearer tokens, the authentication
//!   gate, and the ownership check
//! - `models`: database models (users, tasks) and their CRUD
//!   operations
//! - `db`: connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the taskdeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
