/// Database models
///
/// Each model owns its table's CRUD operations.
///
/// # Models
///
/// - `user`: user accounts (unique username, hashed password)
/// - `task`: owner-scoped task records

pub mod task;
pub mod user;
