use crate::api::routes::{
    address_routes, admin_routes, auth_routes, cart_routes, order_routes, product_routes,
};
use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub async fn start() {
    let cors_layer = CorsLayer::new().allow_origin(Any);

    let router = Router::new()
        .route("/api", get(|| async { "Storefront API is running!" }))
        .nest("/api/v1/auth", auth_routes::routes())
        .nest("/api/v1/products", product_routes::routes())
        .nest("/api/v1/cart", cart_routes::routes())
        .nest("/api/v1/addresses", address_routes::routes())
        .nest("/api/v1/orders", order_routes::routes())
        .nest("/api/v1/admin", admin_routes::routes())
        .layer(cors_layer)
        .with_state::<()>(());

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 3000)))
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running on http://127.0.0.1:3000");

    axum::serve(listener, router)
        .await
        .expect("Failed to start the server");
}
