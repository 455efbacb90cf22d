pub mod address_service;
pub mod admin_service;
pub mod auth_service;
pub mod cart_service;
pub mod delivery;
pub mod errors;
pub mod order_service;
pub mod product_service;
