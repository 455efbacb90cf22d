use crate::api::extractors::AdminIdentity;
use crate::api::request::AdminOrderListQuery;
use crate::api::response::{AdminOrderResponse, MessageResponse};
use crate::services::admin_service::AdminService;
use crate::services::errors::AdminServiceError;
use crate::services::order_service::OrderStatus;
use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::str::FromStr;

/// Verify a reported payment and activate the order
pub async fn approve_order(
    identity: AdminIdentity,
    Path(order_id): Path<i32>,
) -> impl IntoResponse {
    let service = AdminService::new();

    match service.approve_order(identity.admin_id, order_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: format!("Order #{order_id} approved successfully."),
            }),
        )
            .into_response(),
        Err(e @ AdminServiceError::PreconditionFailed(_)) => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Manual-payment orders waiting on verification
pub async fn pending_orders(_identity: AdminIdentity) -> impl IntoResponse {
    let service = AdminService::new();

    match service.pending_review().await {
        Ok(orders) => {
            let response: Vec<AdminOrderResponse> =
                orders.into_iter().map(AdminOrderResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// All orders, optionally narrowed to one status
pub async fn get_all_orders(
    _identity: AdminIdentity,
    Query(params): Query<AdminOrderListQuery>,
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

    let service = AdminService::new();

    match service.all_orders(status).await {
        Ok(orders) => {
            let response: Vec<AdminOrderResponse> =
                orders.into_iter().map(AdminOrderResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
