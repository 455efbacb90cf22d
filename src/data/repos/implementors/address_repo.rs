use crate::data::database::Database;
use crate::data::models::address::{Address, NewAddress};
use diesel::prelude::*;
use diesel::result;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};

pub struct AddressRepo {}

impl AddressRepo {
    pub fn new() -> Self {
        AddressRepo {}
    }

    /// The user's address book, most recent first.
    pub async fn get_by_user(&self, user_id_query: i32) -> Result<Vec<Address>, result::Error> {
        use crate::data::models::schema::addresses::dsl::{addresses, created_at, user_id};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        addresses
            .filter(user_id.eq(user_id_query))
            .order(created_at.desc())
            .load::<Address>(&mut conn)
            .await
    }

    /// Fetches an address only if the given user owns it.
    pub async fn get_for_user(
        &self,
        address_id_query: i32,
        user_id_query: i32,
    ) -> Result<Option<Address>, result::Error> {
        use crate::data::models::schema::addresses::dsl::{addresses, id, user_id};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match addresses
            .filter(id.eq(address_id_query))
            .filter(user_id.eq(user_id_query))
            .first::<Address>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Inserts an address and returns its id.
    pub async fn add(&self, item: NewAddress<'_>) -> Result<i32, result::Error> {
        use crate::data::models::schema::addresses::dsl::addresses;

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction::<i32, result::Error, _>(|connection| {
            async move {
                diesel::insert_into(addresses)
                    .values(&item)
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;

                Ok(new_id)
            }
            .scope_boxed()
        })
        .await
    }
}

impl Default for AddressRepo {
    fn default() -> Self {
        Self::new()
    }
}
