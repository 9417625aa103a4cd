//! # Taskdeck API Server Library
//!
//! Core functionality for the taskdeck API server.
//!
//! ## Modules
//!
//! - `app`: application state, `CurrentUser` extractor, router builder
//! - `config`: configuration management
//! - `error`: error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
