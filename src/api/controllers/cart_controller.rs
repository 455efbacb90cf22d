use crate::api::extractors::CustomerIdentity;
use crate::api::request::{AddToCartRequest, CartDeltaRequest};
use crate::api::response::{CartResponse, MessageResponse};
use crate::data::repos::implementors::cart_repo::CartMutation;
use crate::services::cart_service::CartService;
use crate::services::errors::CartServiceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Get the caller's cart with totals computed on read
pub async fn get_cart(identity: CustomerIdentity) -> impl IntoResponse {
    let service = CartService::new();

    match service.get_cart(identity.user_id).await {
        Ok(state) => (StatusCode::OK, Json(CartResponse::from(state))).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Add one unit of a product to the cart
pub async fn add_item(
    identity: CustomerIdentity,
    Json(payload): Json<AddToCartRequest>,
) -> impl IntoResponse {
    let service = CartService::new();

    match service
        .add_to_cart(identity.user_id, payload.product_id)
        .await
    {
        Ok(CartMutation::Added) => (
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "Item added to cart.".to_string(),
            }),
        )
            .into_response(),
        Ok(_) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Item quantity updated in cart.".to_string(),
            }),
        )
            .into_response(),
        Err(e @ CartServiceError::ProductNotFound) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e @ CartServiceError::InvalidQuantityChange) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Apply a signed quantity change to a cart line
pub async fn change_quantity(
    identity: CustomerIdentity,
    Json(payload): Json<CartDeltaRequest>,
) -> impl IntoResponse {
    let service = CartService::new();

    match service
        .apply_delta(identity.user_id, payload.product_id, payload.quantity)
        .await
    {
        Ok(CartMutation::Removed) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Item removed from cart.".to_string(),
            }),
        )
            .into_response(),
        Ok(_) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Cart updated successfully.".to_string(),
            }),
        )
            .into_response(),
        Err(e @ CartServiceError::NotInCart) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e @ CartServiceError::InvalidQuantityChange) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
