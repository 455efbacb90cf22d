use crate::security::errors::AuthError;
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use tokio::task;

/// Hashes a password with argon2 on a blocking thread.
pub async fn hash(password: &str) -> Result<String, AuthError> {
    let password = password.to_string();

    task::spawn_blocking(move || {
        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut OsRng);

        match argon2.hash_password(password.as_bytes(), &salt) {
            Ok(hash) => Ok(hash.to_string()),
            Err(_) => Err(AuthError::HashingError),
        }
    })
    .await
    .map_err(|_| AuthError::HashingError)?
}

/// Verifies a password against a stored argon2 hash. A mismatch is `Ok(false)`;
/// a malformed hash is an error.
pub async fn verify(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();

    task::spawn_blocking(move || {
        let parsed_hash = match argon2::password_hash::PasswordHash::new(&stored_hash) {
            Ok(h) => h,
            Err(_) => return Err(AuthError::VerificationError),
        };

        let argon2 = Argon2::default();

        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(AuthError::VerificationError),
        }
    })
    .await
    .map_err(|_| AuthError::VerificationError)?
}
