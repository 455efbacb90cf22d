use crate::api::config::Config;
use crate::security::errors::AuthError;
use serde::{Deserialize, Serialize};

/// Who a token speaks for. Customer and admin tokens share the signing key
/// but are never interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScope {
    Customer,
    Admin,
}

impl TokenScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenScope::Customer => "customer",
            TokenScope::Admin => "admin",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user or admin ID, per scope)
    pub sub: i32,
    /// Token scope ("customer" or "admin")
    pub scope: String,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
}

impl AccessClaims {
    pub fn is_admin(&self) -> bool {
        self.scope == TokenScope::Admin.as_str()
    }

    pub fn is_customer(&self) -> bool {
        self.scope == TokenScope::Customer.as_str()
    }
}

pub struct JwtService;

impl JwtService {
    pub fn new() -> Self {
        JwtService
    }

    pub fn generate_token(&self, subject: i32, scope: TokenScope) -> Result<String, AuthError> {
        let curr_time = chrono::Utc::now().timestamp() as usize;
        let config = Config::default();

        let claims = AccessClaims {
            sub: subject,
            scope: scope.as_str().to_string(),
            iat: curr_time,
            exp: curr_time + (config.jwt_expiration_minutes * 60) as usize,
        };

        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(config.jwt_secret.as_ref()),
        )
        .map_err(|_| AuthError::TokenCreationError)
    }

    pub fn decode_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let validation = jsonwebtoken::Validation::default();

        let token_data = jsonwebtoken::decode::<AccessClaims>(
            token,
            &jsonwebtoken::DecodingKey::from_secret(Config::default().jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AuthError::InvalidToken)?;

        Ok(token_data.claims)
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}
