/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: bearer token issuance and verification (HS256, 60 min)
/// - [`gate`]: the authentication gate resolving requests to users
/// - [`authorization`]: strict owner-equality check
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::jwt::TokenSigner;
/// use taskdeck_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let signer = TokenSigner::new("a-secret-key-at-least-32-bytes-long");
/// let token = signer.issue(1)?;
/// assert_eq!(signer.verify(&token)?, 1);
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod gate;
pub mod jwt;
pub mod password;
