pub mod address;
pub mod admin;
pub mod cart_line;
pub mod order;
pub mod order_detail;
pub mod product;
pub mod schema;
pub mod user;
