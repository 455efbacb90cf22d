use crate::data::database::Database;
use crate::data::models::admin::NewAdminLog;
use crate::data::models::order::{NewOrder, Order};
use crate::data::models::order_detail::{NewOrderDetail, OrderDetail};
use crate::data::models::product::Product;
use crate::data::models::user::User;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::result;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};

/// Outcome of the approval compare-and-swap. Anything but `Approved` means
/// the transaction wrote nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalCheck {
    Approved,
    NotFound,
    WrongStatus,
    NotManualPayment,
}

pub struct OrderRepo {}

impl OrderRepo {
    pub fn new() -> Self {
        OrderRepo {}
    }

    /// Creates the order snapshot in one transaction: the order row, one
    /// order_details row per cart line (capturing the price passed in, not
    /// whatever the catalog says later), and the removal of the user's cart.
    /// Rolls back as a unit; on failure the cart is untouched.
    pub async fn create_with_items(
        &self,
        new_order: NewOrder<'_>,
        items: Vec<(i32, i32, BigDecimal)>,
    ) -> Result<i32, result::Error> {
        use crate::data::models::schema::cart::dsl::{cart, user_id as cart_user_id};
        use crate::data::models::schema::order_details::dsl::order_details;
        use crate::data::models::schema::orders::dsl::orders;

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        let owner_id = new_order.user_id;

        conn.transaction::<i32, result::Error, _>(|connection| {
            async move {
                diesel::insert_into(orders)
                    .values(&new_order)
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;

                let new_items: Vec<NewOrderDetail> = items
                    .into_iter()
                    .map(|(pid, qty, price)| NewOrderDetail {
                        order_id: new_id,
                        product_id: pid,
                        quantity: qty,
                        price,
                    })
                    .collect();

                diesel::insert_into(order_details)
                    .values(&new_items)
                    .execute(connection)
                    .await?;

                diesel::delete(cart.filter(cart_user_id.eq(owner_id)))
                    .execute(connection)
                    .await?;

                Ok(new_id)
            }
            .scope_boxed()
        })
        .await
    }

    /// Conditional single-row transition keyed on owner and current status.
    /// Returns the number of rows updated; 0 means the order did not belong
    /// to the caller or was not in the expected state.
    pub async fn mark_payment_confirmed(
        &self,
        order_id_query: i32,
        user_id_query: i32,
        expected_status: &str,
        new_status: &str,
    ) -> Result<usize, result::Error> {
        use crate::data::models::schema::orders::dsl::{
            id, orders, payment_confirmed_at, status, user_id,
        };

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        diesel::update(
            orders
                .filter(id.eq(order_id_query))
                .filter(user_id.eq(user_id_query))
                .filter(status.eq(expected_status)),
        )
        .set((
            status.eq(new_status),
            payment_confirmed_at.eq(chrono::Utc::now().naive_utc()),
        ))
        .execute(&mut conn)
        .await
    }

    /// Buyer-side cancellation, permitted only while the order sits in one of
    /// the given pre-active statuses. Rows-affected semantics as above.
    pub async fn cancel(
        &self,
        order_id_query: i32,
        user_id_query: i32,
        cancellable_statuses: &[&str],
        cancelled_status: &str,
    ) -> Result<usize, result::Error> {
        use crate::data::models::schema::orders::dsl::{id, orders, status, user_id};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        diesel::update(
            orders
                .filter(id.eq(order_id_query))
                .filter(user_id.eq(user_id_query))
                .filter(status.eq_any(cancellable_statuses.iter().copied())),
        )
        .set(status.eq(cancelled_status))
        .execute(&mut conn)
        .await
    }

    /// Admin approval as a compare-and-swap: re-read the row under a lock,
    /// verify status and payment method, then write the transition and the
    /// audit log entry in the same transaction.
    pub async fn approve(
        &self,
        order_id_query: i32,
        admin_id_query: i32,
        expected_status: &str,
        expected_method: &str,
        active_status: &str,
    ) -> Result<ApprovalCheck, result::Error> {
        use crate::data::models::schema::admin_logs::dsl::admin_logs;
        use crate::data::models::schema::orders::dsl::{
            approved_at, approved_by, id, orders, status,
        };

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        let expected_status = expected_status.to_string();
        let expected_method = expected_method.to_string();
        let active_status = active_status.to_string();

        conn.transaction::<ApprovalCheck, result::Error, _>(|connection| {
            async move {
                let order = match orders
                    .filter(id.eq(order_id_query))
                    .for_update()
                    .first::<Order>(connection)
                    .await
                {
                    Ok(value) => value,
                    Err(result::Error::NotFound) => return Ok(ApprovalCheck::NotFound),
                    Err(e) => return Err(e),
                };

                if order.status != expected_status {
                    return Ok(ApprovalCheck::WrongStatus);
                }

                if order.payment_method != expected_method {
                    return Ok(ApprovalCheck::NotManualPayment);
                }

                diesel::update(orders.filter(id.eq(order_id_query)))
                    .set((
                        status.eq(active_status.as_str()),
                        approved_at.eq(chrono::Utc::now().naive_utc()),
                        approved_by.eq(admin_id_query),
                    ))
                    .execute(connection)
                    .await?;

                let description = format!("Approved order #{order_id_query}.");
                diesel::insert_into(admin_logs)
                    .values(&NewAdminLog {
                        admin_id: admin_id_query,
                        action: "approve_order",
                        description: Some(description.as_str()),
                    })
                    .execute(connection)
                    .await?;

                Ok(ApprovalCheck::Approved)
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn get_by_id(&self, id_query: i32) -> Result<Option<Order>, result::Error> {
        use crate::data::models::schema::orders::dsl::{id, orders};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match orders.filter(id.eq(id_query)).first::<Order>(&mut conn).await {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Fetches an order only if it belongs to the given user.
    pub async fn get_for_user(
        &self,
        order_id_query: i32,
        user_id_query: i32,
    ) -> Result<Option<Order>, result::Error> {
        use crate::data::models::schema::orders::dsl::{id, orders, user_id};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match orders
            .filter(id.eq(order_id_query))
            .filter(user_id.eq(user_id_query))
            .first::<Order>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Pages through a user's order history, newest first, optionally
    /// narrowed to one status.
    pub async fn get_by_user(
        &self,
        user_id_query: i32,
        status_query: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, result::Error> {
        use crate::data::models::schema::orders::dsl::{order_date, orders, status, user_id};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        let mut query = orders
            .filter(user_id.eq(user_id_query))
            .order(order_date.desc())
            .into_boxed();

        if let Some(wanted) = status_query {
            query = query.filter(status.eq(wanted.to_string()));
        }

        query
            .limit(limit)
            .offset(offset)
            .load::<Order>(&mut conn)
            .await
    }

    /// Order line snapshots joined to their products, for display.
    pub async fn get_details(
        &self,
        order_id_query: i32,
    ) -> Result<Vec<(OrderDetail, Product)>, result::Error> {
        use crate::data::models::schema::order_details::dsl::{order_details, order_id};
        use crate::data::models::schema::products::dsl::products;

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        order_details
            .inner_join(products)
            .filter(order_id.eq(order_id_query))
            .load::<(OrderDetail, Product)>(&mut conn)
            .await
    }

    /// Raw line snapshots, kept even when the product has since been removed
    /// from the catalog.
    pub async fn get_detail_rows(
        &self,
        order_id_query: i32,
    ) -> Result<Vec<OrderDetail>, result::Error> {
        use crate::data::models::schema::order_details::dsl::{order_details, order_id};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        order_details
            .filter(order_id.eq(order_id_query))
            .load::<OrderDetail>(&mut conn)
            .await
    }

    /// Admin review queue: orders in the given status with the given payment
    /// method, joined to their customers, newest first.
    pub async fn get_review_queue(
        &self,
        status_query: &str,
        method_query: &str,
    ) -> Result<Vec<(Order, User)>, result::Error> {
        use crate::data::models::schema::orders::dsl::{
            order_date, orders, payment_method, status,
        };
        use crate::data::models::schema::users::dsl::users;

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        orders
            .inner_join(users)
            .filter(status.eq(status_query))
            .filter(payment_method.eq(method_query))
            .order(order_date.desc())
            .load::<(Order, User)>(&mut conn)
            .await
    }

    /// All orders joined to their customers, optionally narrowed to a status.
    pub async fn get_all_with_customer(
        &self,
        status_query: Option<&str>,
    ) -> Result<Vec<(Order, User)>, result::Error> {
        use crate::data::models::schema::orders::dsl::{order_date, orders, status};
        use crate::data::models::schema::users::dsl::users;

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        let mut query = orders
            .inner_join(users)
            .order(order_date.desc())
            .into_boxed();

        if let Some(wanted) = status_query {
            query = query.filter(status.eq(wanted.to_string()));
        }

        query.load::<(Order, User)>(&mut conn).await
    }
}

impl Default for OrderRepo {
    fn default() -> Self {
        Self::new()
    }
}
