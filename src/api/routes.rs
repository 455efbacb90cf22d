pub mod address_routes;
pub mod admin_routes;
pub mod auth_routes;
pub mod cart_routes;
pub mod order_routes;
pub mod product_routes;
