use crate::data::models::order::Order;
use crate::data::models::user::User;
use crate::data::repos::implementors::order_repo::{ApprovalCheck, OrderRepo};
use crate::services::errors::AdminServiceError;
use crate::services::order_service::OrderStatus;

/// Admin-side view of the order lifecycle: review queue plus the one
/// transition admins own, pending_verification -> active.
pub struct AdminService;

impl AdminService {
    pub fn new() -> Self {
        AdminService
    }

    /// Verifies a reported payment and activates the order.
    ///
    /// The repo re-checks status and payment method inside the transaction,
    /// so two admins racing on the same order produce exactly one transition
    /// and one audit entry; the loser gets the precondition failure verbatim.
    pub async fn approve_order(
        &self,
        admin_id: i32,
        order_id: i32,
    ) -> Result<(), AdminServiceError> {
        let outcome = OrderRepo::new()
            .approve(
                order_id,
                admin_id,
                OrderStatus::PendingVerification.as_str(),
                "manual",
                OrderStatus::Active.as_str(),
            )
            .await
            .map_err(|e| {
                tracing::error!(order_id, admin_id, error = %e, "approval transaction failed");
                AdminServiceError::Storage
            })?;

        match outcome {
            ApprovalCheck::Approved => {
                tracing::info!(order_id, admin_id, "order approved");
                Ok(())
            }
            ApprovalCheck::NotFound => Err(AdminServiceError::PreconditionFailed(
                "Order not found.".to_string(),
            )),
            ApprovalCheck::WrongStatus => Err(AdminServiceError::PreconditionFailed(
                "Order is not pending approval.".to_string(),
            )),
            ApprovalCheck::NotManualPayment => Err(AdminServiceError::PreconditionFailed(
                "Order is not a manual payment order.".to_string(),
            )),
        }
    }

    /// Manual-payment orders whose buyers have reported a transfer, waiting
    /// on verification.
    pub async fn pending_review(&self) -> Result<Vec<(Order, User)>, AdminServiceError> {
        OrderRepo::new()
            .get_review_queue(OrderStatus::PendingVerification.as_str(), "manual")
            .await
            .map_err(|_| AdminServiceError::Storage)
    }

    /// All orders with their customers, optionally narrowed to one status.
    pub async fn all_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<(Order, User)>, AdminServiceError> {
        OrderRepo::new()
            .get_all_with_customer(status.map(|s| s.as_str()))
            .await
            .map_err(|_| AdminServiceError::Storage)
    }
}

impl Default for AdminService {
    fn default() -> Self {
        Self::new()
    }
}
