use crate::api::controllers::cart_controller;
use axum::Router;
use axum::routing::{get, patch, post};

pub fn routes() -> Router {
    Router::new()
        .route("/", get(cart_controller::get_cart))
        .route("/items", post(cart_controller::add_item))
        .route("/items", patch(cart_controller::change_quantity))
}
