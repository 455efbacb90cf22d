use crate::api::controllers::order_controller;
use axum::Router;
use axum::routing::{get, post};

pub fn routes() -> Router {
    Router::new()
        .route("/", post(order_controller::checkout))
        .route("/", get(order_controller::get_orders))
        .route("/{id}", get(order_controller::get_order_by_id))
        .route(
            "/{id}/confirm-payment",
            post(order_controller::confirm_payment),
        )
        .route("/{id}/cancel", post(order_controller::cancel_order))
        .route("/{id}/reorder", post(order_controller::reorder))
}
