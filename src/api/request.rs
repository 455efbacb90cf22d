use bigdecimal::BigDecimal;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct AddToCartRequest {
    pub product_id: i32,
}

/// A signed quantity change for one cart line.
#[derive(Deserialize)]
pub struct CartDeltaRequest {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Deserialize)]
pub struct SaveAddressRequest {
    pub full_name: String,
    pub address_line1: String,
    pub city: String,
    pub state: String,
}

/// Checkout form: either a saved address id or the fields for a new one.
#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub address_id: Option<i32>,
    pub new_address: Option<SaveAddressRequest>,
    pub delivery_option: String,
    pub payment_method: String,
}

#[derive(Deserialize)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<i64>,
}

#[derive(Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
}

#[derive(Deserialize)]
pub struct AdminOrderListQuery {
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub image_path: Option<String>,
}
