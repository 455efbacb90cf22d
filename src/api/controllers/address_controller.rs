use crate::api::extractors::CustomerIdentity;
use crate::api::request::SaveAddressRequest;
use crate::api::response::{AddressResponse, SavedAddressResponse};
use crate::services::address_service::AddressService;
use crate::services::errors::AddressServiceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// The caller's address book, most recent first
pub async fn get_addresses(identity: CustomerIdentity) -> impl IntoResponse {
    let service = AddressService::new();

    match service.get_addresses(identity.user_id).await {
        Ok(addresses) => {
            let response: Vec<AddressResponse> =
                addresses.into_iter().map(AddressResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Save a new address
pub async fn save_address(
    identity: CustomerIdentity,
    Json(payload): Json<SaveAddressRequest>,
) -> impl IntoResponse {
    let service = AddressService::new();

    match service
        .save_address(
            identity.user_id,
            &payload.full_name,
            &payload.address_line1,
            &payload.city,
            &payload.state,
        )
        .await
    {
        Ok(id) => (
            StatusCode::CREATED,
            Json(SavedAddressResponse {
                id,
                full_address: format!(
                    "{}, {}, {}, {}",
                    payload.full_name.trim(),
                    payload.address_line1.trim(),
                    payload.city.trim(),
                    payload.state.trim()
                ),
            }),
        )
            .into_response(),
        Err(e @ AddressServiceError::MissingField) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
