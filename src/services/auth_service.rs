use crate::data::models::admin::Admin;
use crate::data::models::user::{NewUser, User};
use crate::data::repos::implementors::admin_repo::AdminRepo;
use crate::data::repos::implementors::user_repo::UserRepo;
use crate::security::jwt::{JwtService, TokenScope};
use crate::security::password;
use crate::services::errors::AuthServiceError;

pub struct AuthService;

impl AuthService {
    pub fn new() -> Self {
        AuthService
    }

    /// Creates a customer account. The email must be unused; the password
    /// and its confirmation must match.
    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        pass: &str,
        confirm_password: &str,
    ) -> Result<(), AuthServiceError> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() || email.is_empty() || pass.is_empty() {
            return Err(AuthServiceError::MissingField);
        }
        if pass != confirm_password {
            return Err(AuthServiceError::PasswordMismatch);
        }

        let repo = UserRepo::new();

        if repo
            .get_by_email(email)
            .await
            .map_err(|_| AuthServiceError::Storage)?
            .is_some()
        {
            return Err(AuthServiceError::EmailTaken);
        }

        let password_hash = password::hash(pass)
            .await
            .map_err(|_| AuthServiceError::Internal)?;

        repo.add(NewUser {
            name,
            email,
            password_hash: &password_hash,
        })
        .await
        .map_err(|_| AuthServiceError::Storage)
    }

    /// Customer login: verifies credentials and issues a customer-scoped
    /// token.
    pub async fn login_user(
        &self,
        email: &str,
        pass: &str,
    ) -> Result<(String, User), AuthServiceError> {
        let user = UserRepo::new()
            .get_by_email(email.trim())
            .await
            .map_err(|_| AuthServiceError::Storage)?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let verified = password::verify(pass, &user.password_hash)
            .await
            .map_err(|_| AuthServiceError::Internal)?;
        if !verified {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = JwtService::new()
            .generate_token(user.id, TokenScope::Customer)
            .map_err(|_| AuthServiceError::Internal)?;

        Ok((token, user))
    }

    /// Admin login: verifies credentials, records the login in the audit
    /// log, and issues an admin-scoped token.
    pub async fn login_admin(
        &self,
        username: &str,
        pass: &str,
    ) -> Result<(String, Admin), AuthServiceError> {
        let username = username.trim();

        if !valid_admin_username(username) {
            return Err(AuthServiceError::InvalidUsername);
        }

        let repo = AdminRepo::new();

        let admin = repo
            .get_by_username(username)
            .await
            .map_err(|_| AuthServiceError::Storage)?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let verified = password::verify(pass, &admin.password_hash)
            .await
            .map_err(|_| AuthServiceError::Internal)?;
        if !verified {
            return Err(AuthServiceError::InvalidCredentials);
        }

        repo.log_action(admin.id, "login", Some("Admin logged in successfully."))
            .await
            .map_err(|_| AuthServiceError::Storage)?;

        let token = JwtService::new()
            .generate_token(admin.id, TokenScope::Admin)
            .map_err(|_| AuthServiceError::Internal)?;

        Ok((token, admin))
    }
}

/// Letters, digits and underscores, 3 to 32 characters.
fn valid_admin_username(username: &str) -> bool {
    (3..=32).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}
