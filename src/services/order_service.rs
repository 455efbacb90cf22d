use crate::api::config::Config;
use crate::data::models::order::{NewOrder, Order};
use crate::data::models::order_detail::OrderDetail;
use crate::data::models::product::Product;
use crate::data::repos::implementors::address_repo::AddressRepo;
use crate::data::repos::implementors::cart_repo::CartRepo;
use crate::data::repos::implementors::order_repo::OrderRepo;
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::data::models::address::NewAddress;
use crate::services::delivery::DeliveryOption;
use crate::services::errors::OrderServiceError;
use bigdecimal::BigDecimal;
use std::str::FromStr;

/// Order statuses for the manual-payment lifecycle. This enum is the single
/// source of truth for the transition table; every entry point goes through
/// the service methods below rather than issuing its own status updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Order placed; bank-transfer instructions shown, waiting on the buyer.
    AwaitingPayment,
    /// Buyer asserts the transfer was sent; waiting on admin verification.
    PendingVerification,
    /// Admin verified the payment.
    Active,
    /// Buyer backed out before the order went active.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::AwaitingPayment => "awaiting_payment",
            OrderStatus::PendingVerification => "pending_verification",
            OrderStatus::Active => "active",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Buyer-side cancellation is allowed until an admin has made the order
    /// active.
    pub fn is_cancellable(&self) -> bool {
        matches!(
            self,
            OrderStatus::AwaitingPayment | OrderStatus::PendingVerification
        )
    }
}

impl FromStr for OrderStatus {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "awaiting_payment" => Ok(OrderStatus::AwaitingPayment),
            "pending_verification" => Ok(OrderStatus::PendingVerification),
            "active" => Ok(OrderStatus::Active),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// Shipping destination chosen at checkout: a saved address or a new one to
/// store first.
#[derive(Debug)]
pub enum ShippingAddress {
    Saved(i32),
    New {
        full_name: String,
        address_line1: String,
        city: String,
        state: String,
    },
}

#[derive(Debug)]
pub struct Checkout {
    pub address: ShippingAddress,
    pub delivery_option: String,
    pub payment_method: String,
}

/// Bank-transfer details shown to the buyer once the order exists.
#[derive(Debug)]
pub struct PaymentInstructions {
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
    pub currency: String,
    pub reference: String,
    pub note: Option<String>,
    pub deadline: chrono::NaiveDate,
}

#[derive(Debug)]
pub struct PlacedOrder {
    pub order_id: i32,
    pub total_amount: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub grand_total: BigDecimal,
    pub instructions: PaymentInstructions,
}

pub struct OrderService;

impl OrderService {
    pub fn new() -> Self {
        OrderService
    }

    /// Turns the caller's cart into an order snapshot.
    ///
    /// Validation happens up front: bank details configured, manual payment
    /// selected, delivery option known, cart non-empty, address owned by the
    /// caller (or freshly stored). The snapshot itself — order row, line
    /// items at current prices, cart removal — is one transaction; if any
    /// part fails the cart is left untouched and the cause is wrapped in
    /// `CheckoutFailed`.
    pub async fn place_order(
        &self,
        user_id: i32,
        checkout: Checkout,
    ) -> Result<PlacedOrder, OrderServiceError> {
        let config = Config::new();

        if !config.payment_configured() {
            return Err(OrderServiceError::PaymentNotConfigured);
        }

        if checkout.payment_method != "manual" {
            return Err(OrderServiceError::UnsupportedPaymentMethod(
                checkout.payment_method,
            ));
        }

        let delivery = DeliveryOption::from_str(&checkout.delivery_option)
            .map_err(|_| OrderServiceError::UnknownDeliveryOption(checkout.delivery_option.clone()))?;

        let cart_rows = CartRepo::new()
            .get_lines(user_id)
            .await
            .map_err(|_| OrderServiceError::Storage)?;

        if cart_rows.is_empty() {
            return Err(OrderServiceError::EmptyCart);
        }

        let address_id = self.resolve_address(user_id, checkout.address).await?;

        let total_amount: BigDecimal = cart_rows
            .iter()
            .map(|(line, product)| &product.price * BigDecimal::from(line.quantity))
            .sum();

        let delivery_fee = delivery.fee_amount();

        let items: Vec<(i32, i32, BigDecimal)> = cart_rows
            .iter()
            .map(|(line, product)| (product.id, line.quantity, product.price.clone()))
            .collect();

        let new_order = NewOrder {
            user_id,
            order_date: chrono::Utc::now().naive_utc(),
            total_amount: total_amount.clone(),
            delivery_fee: delivery_fee.clone(),
            status: OrderStatus::AwaitingPayment.as_str(),
            payment_method: "manual",
            delivery_option: delivery.as_str(),
            address_id,
        };

        let order_id = OrderRepo::new()
            .create_with_items(new_order, items)
            .await
            .map_err(OrderServiceError::CheckoutFailed)?;

        let grand_total = &total_amount + &delivery_fee;

        tracing::info!(order_id, user_id, %grand_total, "order placed, awaiting payment");

        Ok(PlacedOrder {
            order_id,
            total_amount,
            delivery_fee,
            grand_total,
            instructions: self.payment_instructions(&config, order_id),
        })
    }

    /// Buyer reports the bank transfer as sent. A single conditional update;
    /// zero rows affected means the order was not the caller's or was not
    /// awaiting payment.
    pub async fn confirm_payment(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> Result<(), OrderServiceError> {
        let rows = OrderRepo::new()
            .mark_payment_confirmed(
                order_id,
                user_id,
                OrderStatus::AwaitingPayment.as_str(),
                OrderStatus::PendingVerification.as_str(),
            )
            .await
            .map_err(|_| OrderServiceError::Storage)?;

        if rows == 0 {
            return Err(OrderServiceError::PreconditionFailed(
                "This order cannot be confirmed for payment at this time.".to_string(),
            ));
        }

        tracing::info!(order_id, user_id, "payment reported, pending verification");
        Ok(())
    }

    /// Buyer-side cancellation, only while the order has not gone active.
    pub async fn cancel_order(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> Result<(), OrderServiceError> {
        let rows = OrderRepo::new()
            .cancel(
                order_id,
                user_id,
                &[
                    OrderStatus::AwaitingPayment.as_str(),
                    OrderStatus::PendingVerification.as_str(),
                ],
                OrderStatus::Cancelled.as_str(),
            )
            .await
            .map_err(|_| OrderServiceError::Storage)?;

        if rows == 0 {
            return Err(OrderServiceError::PreconditionFailed(
                "Only orders awaiting payment or verification can be cancelled.".to_string(),
            ));
        }

        tracing::info!(order_id, user_id, "order cancelled by buyer");
        Ok(())
    }

    /// Puts a past order's line items back into the cart. Products that have
    /// left the catalog are skipped; returns how many lines were re-added.
    pub async fn reorder(&self, user_id: i32, order_id: i32) -> Result<usize, OrderServiceError> {
        let repo = OrderRepo::new();

        repo.get_for_user(order_id, user_id)
            .await
            .map_err(|_| OrderServiceError::Storage)?
            .ok_or(OrderServiceError::OrderNotFound)?;

        let details = repo
            .get_detail_rows(order_id)
            .await
            .map_err(|_| OrderServiceError::Storage)?;

        let products = ProductRepo::new();
        let cart = CartRepo::new();
        let mut added = 0;

        for detail in details {
            let available = products
                .exists(detail.product_id)
                .await
                .map_err(|_| OrderServiceError::Storage)?;
            if !available {
                continue;
            }

            cart.apply_delta(user_id, detail.product_id, detail.quantity)
                .await
                .map_err(|_| OrderServiceError::Storage)?;
            added += 1;
        }

        Ok(added)
    }

    /// A page of the caller's order history, newest first.
    pub async fn get_orders(
        &self,
        user_id: i32,
        status: Option<OrderStatus>,
        page: i64,
    ) -> Result<Vec<Order>, OrderServiceError> {
        const PAGE_SIZE: i64 = 10;

        let page = page.max(1);
        OrderRepo::new()
            .get_by_user(
                user_id,
                status.map(|s| s.as_str()),
                PAGE_SIZE,
                (page - 1) * PAGE_SIZE,
            )
            .await
            .map_err(|_| OrderServiceError::Storage)
    }

    /// One of the caller's orders with its line-item snapshot.
    pub async fn get_order(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> Result<(Order, Vec<(OrderDetail, Product)>), OrderServiceError> {
        let repo = OrderRepo::new();

        let order = repo
            .get_for_user(order_id, user_id)
            .await
            .map_err(|_| OrderServiceError::Storage)?
            .ok_or(OrderServiceError::OrderNotFound)?;

        let details = repo
            .get_details(order_id)
            .await
            .map_err(|_| OrderServiceError::Storage)?;

        Ok((order, details))
    }

    async fn resolve_address(
        &self,
        user_id: i32,
        address: ShippingAddress,
    ) -> Result<i32, OrderServiceError> {
        let repo = AddressRepo::new();

        match address {
            ShippingAddress::Saved(address_id) => {
                repo.get_for_user(address_id, user_id)
                    .await
                    .map_err(|_| OrderServiceError::Storage)?
                    .ok_or(OrderServiceError::AddressNotFound)?;
                Ok(address_id)
            }
            ShippingAddress::New {
                full_name,
                address_line1,
                city,
                state,
            } => {
                if full_name.trim().is_empty()
                    || address_line1.trim().is_empty()
                    || city.trim().is_empty()
                    || state.trim().is_empty()
                {
                    return Err(OrderServiceError::MissingAddressField);
                }

                repo.add(NewAddress {
                    user_id,
                    full_name: full_name.trim(),
                    address_line1: address_line1.trim(),
                    city: city.trim(),
                    state: state.trim(),
                })
                .await
                .map_err(|_| OrderServiceError::Storage)
            }
        }
    }

    fn payment_instructions(&self, config: &Config, order_id: i32) -> PaymentInstructions {
        let deadline = (chrono::Utc::now() + chrono::Duration::days(config.payment_deadline_days))
            .date_naive();

        PaymentInstructions {
            bank_name: config.bank_name.clone().unwrap_or_default(),
            account_number: config.bank_account_number.clone().unwrap_or_default(),
            account_name: config.bank_account_name.clone().unwrap_or_default(),
            currency: config.payment_currency.clone(),
            reference: format!("Order #{order_id}"),
            note: config.payment_instructions.clone(),
            deadline,
        }
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_round_trip() {
        assert_eq!(OrderStatus::AwaitingPayment.as_str(), "awaiting_payment");
        assert_eq!(
            OrderStatus::PendingVerification.as_str(),
            "pending_verification"
        );
        assert_eq!(OrderStatus::Active.as_str(), "active");
        assert_eq!(OrderStatus::Cancelled.as_str(), "cancelled");

        assert_eq!(
            OrderStatus::from_str("awaiting_payment"),
            Ok(OrderStatus::AwaitingPayment)
        );
        assert_eq!(
            OrderStatus::from_str("PENDING_VERIFICATION"),
            Ok(OrderStatus::PendingVerification)
        );
        assert_eq!(OrderStatus::from_str("Active"), Ok(OrderStatus::Active));
        assert_eq!(
            OrderStatus::from_str("cancelled"),
            Ok(OrderStatus::Cancelled)
        );
        assert_eq!(OrderStatus::from_str("approved"), Err(()));
        assert_eq!(OrderStatus::from_str("pending"), Err(()));
    }

    #[test]
    fn cancellation_window_closes_at_active() {
        assert!(OrderStatus::AwaitingPayment.is_cancellable());
        assert!(OrderStatus::PendingVerification.is_cancellable());
        assert!(!OrderStatus::Active.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }
}
