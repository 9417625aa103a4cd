/// Authentication gate
///
/// Turns a raw `Authorization` header into an authenticated [`User`],
/// or rejects the request. The gate is a trait so route handlers
/// depend on the capability rather than on the JWT machinery; tests
/// can swap in a stub without touching tokens or the database.
///
/// # Flow
///
/// 1. Header absent, or scheme is not `bearer` → [`AuthError::Unauthenticated`]
/// 2. Token fails verification → `Unauthenticated` (malformed) or
///    [`AuthError::TokenExpired`] (past expiry)
/// 3. Decoded user id has no matching user → `Unauthenticated`.
///    The token is the untrusted input, so an unknown subject is an
///    authentication failure, not a not-found.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::auth::gate::{AuthGate, JwtAuthGate};
/// use taskdeck_shared::auth::jwt::TokenSigner;
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let signer = TokenSigner::new("a-secret-key-at-least-32-bytes-long");
/// let gate = JwtAuthGate::new(signer.clone(), pool);
///
/// let token = signer.issue(1)?;
/// let header = format!("Bearer {}", token);
/// let user = gate.authenticate(Some(&header)).await?;
/// assert_eq!(user.id, 1);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::PgPool;

use super::jwt::{JwtError, TokenSigner};
use crate::models::user::User;

/// Error type for authentication failures
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing, malformed, or unresolvable credentials
    #[error("Authentication required")]
    Unauthenticated,

    /// Token was valid once but its expiry window has passed
    ///
    /// Distinct from `Unauthenticated` so the client gets a message
    /// telling it to log in again; same 401 status class.
    #[error("Token has expired")]
    TokenExpired,

    /// The user lookup itself failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Capability to resolve request credentials into a user
///
/// Injected into application state as `Arc<dyn AuthGate>`; the API
/// crate's `CurrentUser` extractor delegates here.
#[async_trait]
pub trait AuthGate: Send + Sync {
    /// Authenticates the raw `Authorization` header value, if any
    async fn authenticate(&self, authorization: Option<&str>) -> Result<User, AuthError>;
}

/// Production gate: bearer JWT verification plus a user lookup
pub struct JwtAuthGate {
    signer: TokenSigner,
    pool: PgPool,
}

impl JwtAuthGate {
    /// Creates a gate from the process-wide signer and pool
    pub fn new(signer: TokenSigner, pool: PgPool) -> Self {
        Self { signer, pool }
    }
}

#[async_trait]
impl AuthGate for JwtAuthGate {
    async fn authenticate(&self, authorization: Option<&str>) -> Result<User, AuthError> {
        let header = authorization.ok_or(AuthError::Unauthenticated)?;

        // Scheme match is case-insensitive: "Bearer x", "bearer x"
        // and "BEARER x" are all accepted.
        let token = strip_bearer(header).ok_or(AuthError::Unauthenticated)?;

        let user_id = self.signer.verify(token).map_err(|e| match e {
            JwtError::Expired => AuthError::TokenExpired,
            _ => AuthError::Unauthenticated,
        })?;

        let user = User::find_by_id(&self.pool, user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        Ok(user)
    }
}

/// Splits a `bearer <token>` header value, ignoring scheme case
fn strip_bearer(header: &str) -> Option<&str> {
    let (scheme, rest) = header.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        let token = rest.trim();
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    } else {
        None
    }
}
