use crate::data::database::Database;
use crate::data::models::cart_line::CartLine;
use crate::data::models::product::Product;
use diesel::prelude::*;
use diesel::result;
use diesel::sql_types::Integer;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};

/// Outcome of a single cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartMutation {
    Added,
    Updated,
    Removed,
    NotInCart,
}

pub struct CartRepo {}

impl CartRepo {
    pub fn new() -> Self {
        CartRepo {}
    }

    /// Applies a quantity delta to the (user, product) cart line as a single
    /// atomic statement, so concurrent calls never lose an update.
    ///
    /// Positive deltas upsert-increment; non-positive deltas decrement in
    /// place and drop the row once the quantity reaches zero or below. A
    /// negative delta against a missing line reports `NotInCart`.
    pub async fn apply_delta(
        &self,
        user_id_query: i32,
        product_id_query: i32,
        delta: i32,
    ) -> Result<CartMutation, result::Error> {
        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        if delta > 0 {
            // MySQL reports 1 affected row for a fresh insert and 2 for an
            // ON DUPLICATE KEY increment.
            let rows = diesel::sql_query(
                "INSERT INTO cart (user_id, product_id, quantity) VALUES (?, ?, ?) \
                 ON DUPLICATE KEY UPDATE quantity = quantity + VALUES(quantity)",
            )
            .bind::<Integer, _>(user_id_query)
            .bind::<Integer, _>(product_id_query)
            .bind::<Integer, _>(delta)
            .execute(&mut conn)
            .await?;

            return Ok(if rows == 1 {
                CartMutation::Added
            } else {
                CartMutation::Updated
            });
        }

        conn.transaction::<CartMutation, result::Error, _>(|connection| {
            async move {
                use crate::data::models::schema::cart::dsl::{
                    cart, product_id, quantity, user_id,
                };

                let updated = diesel::update(
                    cart.filter(user_id.eq(user_id_query))
                        .filter(product_id.eq(product_id_query)),
                )
                .set(quantity.eq(quantity + delta))
                .execute(connection)
                .await?;

                if updated == 0 {
                    return Ok(CartMutation::NotInCart);
                }

                let removed = diesel::delete(
                    cart.filter(user_id.eq(user_id_query))
                        .filter(product_id.eq(product_id_query))
                        .filter(quantity.le(0)),
                )
                .execute(connection)
                .await?;

                Ok(if removed > 0 {
                    CartMutation::Removed
                } else {
                    CartMutation::Updated
                })
            }
            .scope_boxed()
        })
        .await
    }

    /// Retrieves the user's cart lines joined to their products.
    pub async fn get_lines(
        &self,
        user_id_query: i32,
    ) -> Result<Vec<(CartLine, Product)>, result::Error> {
        use crate::data::models::schema::cart::dsl::{cart, user_id};
        use crate::data::models::schema::products::dsl::products;

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        cart.inner_join(products)
            .filter(user_id.eq(user_id_query))
            .load::<(CartLine, Product)>(&mut conn)
            .await
    }

    /// Looks up a single cart line.
    pub async fn get_line(
        &self,
        user_id_query: i32,
        product_id_query: i32,
    ) -> Result<Option<CartLine>, result::Error> {
        use crate::data::models::schema::cart::dsl::{cart, product_id, user_id};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match cart
            .filter(user_id.eq(user_id_query))
            .filter(product_id.eq(product_id_query))
            .first::<CartLine>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl Default for CartRepo {
    fn default() -> Self {
        Self::new()
    }
}
