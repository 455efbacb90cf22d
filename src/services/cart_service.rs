use crate::data::models::cart_line::CartLine;
use crate::data::models::product::Product;
use crate::data::repos::implementors::cart_repo::{CartMutation, CartRepo};
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::services::errors::CartServiceError;
use bigdecimal::BigDecimal;

/// A read of the cart. Totals are computed from the rows at request time;
/// nothing caches them.
#[derive(Debug, PartialEq)]
pub struct CartState {
    pub lines: Vec<CartStateLine>,
    pub subtotal: BigDecimal,
}

#[derive(Debug, PartialEq)]
pub struct CartStateLine {
    pub product_id: i32,
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub line_total: BigDecimal,
}

impl CartState {
    pub fn from_rows(rows: Vec<(CartLine, Product)>) -> Self {
        let lines: Vec<CartStateLine> = rows
            .into_iter()
            .map(|(line, product)| {
                let line_total = &product.price * BigDecimal::from(line.quantity);
                CartStateLine {
                    product_id: product.id,
                    name: product.name,
                    price: product.price,
                    quantity: line.quantity,
                    line_total,
                }
            })
            .collect();

        let subtotal = lines
            .iter()
            .map(|line| line.line_total.clone())
            .sum::<BigDecimal>();

        CartState { lines, subtotal }
    }
}

pub struct CartService;

impl CartService {
    pub fn new() -> Self {
        CartService
    }

    /// Adds one unit of a product to the caller's cart, creating the line if
    /// needed. Fails if the product does not exist.
    pub async fn add_to_cart(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<CartMutation, CartServiceError> {
        if product_id <= 0 {
            return Err(CartServiceError::InvalidQuantityChange);
        }

        let products = ProductRepo::new();
        let known = products
            .exists(product_id)
            .await
            .map_err(|_| CartServiceError::Storage)?;
        if !known {
            return Err(CartServiceError::ProductNotFound);
        }

        CartRepo::new()
            .apply_delta(user_id, product_id, 1)
            .await
            .map_err(|_| CartServiceError::Storage)
    }

    /// Applies a quantity delta to a cart line. Reducing a line to zero or
    /// below removes it; a reduction against a line the user does not have
    /// reports `NotInCart`.
    pub async fn apply_delta(
        &self,
        user_id: i32,
        product_id: i32,
        delta: i32,
    ) -> Result<CartMutation, CartServiceError> {
        if product_id <= 0 || delta == 0 {
            return Err(CartServiceError::InvalidQuantityChange);
        }

        let mutation = CartRepo::new()
            .apply_delta(user_id, product_id, delta)
            .await
            .map_err(|_| CartServiceError::Storage)?;

        match mutation {
            CartMutation::NotInCart => Err(CartServiceError::NotInCart),
            other => Ok(other),
        }
    }

    /// The caller's cart with per-line and overall totals, computed on read.
    pub async fn get_cart(&self, user_id: i32) -> Result<CartState, CartServiceError> {
        let rows = CartRepo::new()
            .get_lines(user_id)
            .await
            .map_err(|_| CartServiceError::Storage)?;

        Ok(CartState::from_rows(rows))
    }
}

impl Default for CartService {
    fn default() -> Self {
        Self::new()
    }
}
