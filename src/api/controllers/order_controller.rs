use crate::api::extractors::CustomerIdentity;
use crate::api::request::{CheckoutRequest, OrderListQuery};
use crate::api::response::{
    MessageResponse, OrderResponse, OrderWithItemsResponse, PlacedOrderResponse, ReorderResponse,
};
use crate::services::errors::OrderServiceError;
use crate::services::order_service::{Checkout, OrderService, OrderStatus, ShippingAddress};
use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::str::FromStr;

/// Place an order from the caller's cart and return the bank-transfer
/// instructions
pub async fn checkout(
    identity: CustomerIdentity,
    Json(payload): Json<CheckoutRequest>,
) -> impl IntoResponse {
    let address = match (payload.address_id, payload.new_address) {
        (Some(address_id), _) => ShippingAddress::Saved(address_id),
        (None, Some(new_address)) => ShippingAddress::New {
            full_name: new_address.full_name,
            address_line1: new_address.address_line1,
            city: new_address.city,
            state: new_address.state,
        },
        (None, None) => {
            return (
                StatusCode::BAD_REQUEST,
                "Please select or add a shipping address.",
            )
                .into_response();
        }
    };

    let service = OrderService::new();

    match service
        .place_order(
            identity.user_id,
            Checkout {
                address,
                delivery_option: payload.delivery_option,
                payment_method: payload.payment_method,
            },
        )
        .await
    {
        Ok(placed) => {
            (StatusCode::CREATED, Json(PlacedOrderResponse::from(placed))).into_response()
        }
        Err(
            e @ (OrderServiceError::EmptyCart
            | OrderServiceError::MissingAddressField
            | OrderServiceError::AddressNotFound
            | OrderServiceError::UnknownDeliveryOption(_)
            | OrderServiceError::UnsupportedPaymentMethod(_)
            | OrderServiceError::PaymentNotConfigured),
        ) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(OrderServiceError::CheckoutFailed(cause)) => {
            tracing::error!(user_id = identity.user_id, error = %cause, "checkout failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error processing your order.",
            )
                .into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Page through the caller's order history
pub async fn get_orders(
    identity: CustomerIdentity,
    Query(params): Query<OrderListQuery>,
) -> impl IntoResponse {
    let status = match params.status.as_deref() {
        None | Some("") => None,
        Some(raw) => match OrderStatus::from_str(raw) {
            Ok(status) => Some(status),
            Err(()) => {
                return (StatusCode::BAD_REQUEST, "Unknown order status filter.").into_response();
            }
        },
    };

    let service = OrderService::new();

    match service
        .get_orders(identity.user_id, status, params.page.unwrap_or(1))
        .await
    {
        Ok(orders) => {
            let response: Vec<OrderResponse> =
                orders.into_iter().map(OrderResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Get one of the caller's orders with its line items
pub async fn get_order_by_id(
    identity: CustomerIdentity,
    Path(order_id): Path<i32>,
) -> impl IntoResponse {
    let service = OrderService::new();

    match service.get_order(identity.user_id, order_id).await {
        Ok(order_with_items) => (
            StatusCode::OK,
            Json(OrderWithItemsResponse::from(order_with_items)),
        )
            .into_response(),
        Err(e @ OrderServiceError::OrderNotFound) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Buyer reports the bank transfer as sent
pub async fn confirm_payment(
    identity: CustomerIdentity,
    Path(order_id): Path<i32>,
) -> impl IntoResponse {
    let service = OrderService::new();

    match service.confirm_payment(identity.user_id, order_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Payment confirmation submitted.".to_string(),
            }),
        )
            .into_response(),
        Err(e @ OrderServiceError::PreconditionFailed(_)) => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Buyer-side cancellation of a not-yet-active order
pub async fn cancel_order(
    identity: CustomerIdentity,
    Path(order_id): Path<i32>,
) -> impl IntoResponse {
    let service = OrderService::new();

    match service.cancel_order(identity.user_id, order_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: format!("Order #{order_id} has been cancelled successfully."),
            }),
        )
            .into_response(),
        Err(e @ OrderServiceError::PreconditionFailed(_)) => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Re-add a past order's items to the cart
pub async fn reorder(identity: CustomerIdentity, Path(order_id): Path<i32>) -> impl IntoResponse {
    let service = OrderService::new();

    match service.reorder(identity.user_id, order_id).await {
        Ok(0) => (
            StatusCode::CONFLICT,
            "No items could be added to cart. Products may no longer be available.",
        )
            .into_response(),
        Ok(added) => (
            StatusCode::OK,
            Json(ReorderResponse {
                added,
                message: format!(
                    "{added} items from order #{order_id} have been added to your cart."
                ),
            }),
        )
            .into_response(),
        Err(e @ OrderServiceError::OrderNotFound) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
