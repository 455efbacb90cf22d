use crate::api::errors::APIErrors;
use crate::security::jwt::{AccessClaims, JwtService};
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

/// Authenticated storefront customer, extracted from a customer-scoped
/// bearer token.
#[derive(Debug, Clone, Copy)]
pub struct CustomerIdentity {
    pub user_id: i32,
}

/// Authenticated admin, extracted from an admin-scoped bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AdminIdentity {
    pub admin_id: i32,
}

impl FromRequestParts<()> for CustomerIdentity {
    type Rejection = APIErrors;

    async fn from_request_parts(parts: &mut Parts, _state: &()) -> Result<Self, Self::Rejection> {
        let claims = decode_claims_from_request_parts(parts).await?;

        if !claims.is_customer() {
            return Err(APIErrors::Forbidden);
        }

        Ok(CustomerIdentity { user_id: claims.sub })
    }
}

impl FromRequestParts<()> for AdminIdentity {
    type Rejection = APIErrors;

    async fn from_request_parts(parts: &mut Parts, _state: &()) -> Result<Self, Self::Rejection> {
        let claims = decode_claims_from_request_parts(parts).await?;

        if !claims.is_admin() {
            return Err(APIErrors::Forbidden);
        }

        Ok(AdminIdentity { admin_id: claims.sub })
    }
}

async fn decode_claims_from_request_parts(parts: &mut Parts) -> Result<AccessClaims, APIErrors> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| {
            tracing::error!("Invalid authorization header");
            APIErrors::Unauthorized
        })?;

    JwtService::new().decode_token(bearer.token()).map_err(|e| {
        tracing::error!("Token decoding error: {:?}", e);
        APIErrors::Unauthorized
    })
}
