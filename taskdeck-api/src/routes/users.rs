/// User endpoints: registration and login
///
/// # Endpoints
///
/// - `POST /users/register` - create an account
/// - `POST /users/login` - exchange credentials for a bearer token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::password,
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username (unique)
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    /// Password (stored only as a hash)
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,

    /// Optional email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Public view of a user; never contains the password hash
#[derive(Debug, Serialize, Deserialize)]
pub struct UserRead {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token, valid for 60 minutes
    pub access_token: String,

    /// Always "bearer"
    pub token_type: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /users/register
/// Content-Type: application/json
///
/// { "username": "alice", "password": "pw1", "email": "a@x.com" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: username already exists
/// - `422 Unprocessable Entity`: validation failed (e.g. malformed
///   email, empty username)
///
/// The existence pre-check is a fast path only; two concurrent
/// registrations can both pass it, and the loser of the insert race
/// is mapped back to 400 by the unique-constraint conversion in
/// `error.rs`.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<UserRead>> {
    req.validate()?;

    if User::find_by_username(&state.db, &req.username)
        .await?
        .is_some()
    {
        return Err(ApiError::BadRequest("Username already exists".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            password_hash,
            email: req.email,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok(Json(UserRead {
        id: user.id,
        username: user.username,
        email: user.email,
    }))
}

/// Login and obtain a bearer token
///
/// # Endpoint
///
/// ```text
/// POST /users/login
/// Content-Type: application/json
///
/// { "username": "alice", "password": "pw1" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: unknown username or wrong password; the
///   same message for both, so usernames can't be probed
/// - `422 Unprocessable Entity`: missing fields
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let user = User::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let access_token = state.signer.issue(user.id)?;

    tracing::debug!(user_id = user.id, "Login succeeded");

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
