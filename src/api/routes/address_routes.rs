use crate::api::controllers::address_controller;
use axum::Router;
use axum::routing::{get, post};

pub fn routes() -> Router {
    Router::new()
        .route("/", get(address_controller::get_addresses))
        .route("/", post(address_controller::save_address))
}
