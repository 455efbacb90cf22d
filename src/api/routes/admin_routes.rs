use crate::api::controllers::admin_controller;
use axum::Router;
use axum::routing::{get, post};

pub fn routes() -> Router {
    Router::new()
        .route("/orders", get(admin_controller::get_all_orders))
        .route("/orders/pending", get(admin_controller::pending_orders))
        .route(
            "/orders/{id}/approve",
            post(admin_controller::approve_order),
        )
}
