/// API route handlers
///
/// Organized by resource:
///
/// - `health`: health check endpoint
/// - `users`: registration and login
/// - `tasks`: owner-scoped task CRUD

pub mod health;
pub mod tasks;
pub mod users;
