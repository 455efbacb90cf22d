use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Serialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub message: String,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct CartLineResponse {
    pub product_id: i32,
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub line_total: BigDecimal,
}

#[derive(Serialize, Deserialize)]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub subtotal: BigDecimal,
}

#[derive(Serialize, Deserialize)]
pub struct AddressResponse {
    pub id: i32,
    pub full_name: String,
    pub address_line1: String,
    pub city: String,
    pub state: String,
}

#[derive(Serialize, Deserialize)]
pub struct SavedAddressResponse {
    pub id: i32,
    pub full_address: String,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct PaymentInstructionsResponse {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub currency: String,
    pub reference: String,
    pub note: Option<String>,
    pub deadline: chrono::NaiveDate,
}

#[derive(Serialize, Deserialize)]
pub struct PlacedOrderResponse {
    pub order_id: i32,
    pub total_amount: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub grand_total: BigDecimal,
    pub payment: PaymentInstructionsResponse,
}

#[derive(Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i32,
    pub order_date: String,
    pub total_amount: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub grand_total: BigDecimal,
    pub status: String,
    pub payment_method: String,
    pub delivery_option: String,
}

#[derive(Serialize, Deserialize)]
pub struct OrderLineResponse {
    pub product_id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: BigDecimal,
    pub line_total: BigDecimal,
}

#[derive(Serialize, Deserialize)]
pub struct OrderWithItemsResponse {
    pub order: OrderResponse,
    pub items: Vec<OrderLineResponse>,
}

#[derive(Serialize, Deserialize)]
pub struct AdminOrderResponse {
    pub id: i32,
    pub customer_email: String,
    pub order_date: String,
    pub total_amount: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub grand_total: BigDecimal,
    pub status: String,
    pub payment_method: String,
}

#[derive(Serialize, Deserialize)]
pub struct ReorderResponse {
    pub added: usize,
    pub message: String,
}
