use crate::data::database::Database;
use crate::data::models::admin::{Admin, AdminLog, NewAdmin, NewAdminLog};
use diesel::prelude::*;
use diesel::result;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};

pub struct AdminRepo {}

impl AdminRepo {
    pub fn new() -> Self {
        AdminRepo {}
    }

    pub async fn get_by_username(
        &self,
        username_query: &str,
    ) -> Result<Option<Admin>, result::Error> {
        use crate::data::models::schema::admins::dsl::{admins, username};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match admins
            .filter(username.eq(username_query))
            .first::<Admin>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn add(&self, item: NewAdmin<'_>) -> Result<(), result::Error> {
        use crate::data::models::schema::admins::dsl::admins;

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(admins)
                    .values(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    /// Appends an audit log entry for an admin action.
    pub async fn log_action(
        &self,
        admin_id_query: i32,
        action_name: &str,
        description_text: Option<&str>,
    ) -> Result<(), result::Error> {
        use crate::data::models::schema::admin_logs::dsl::admin_logs;

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        diesel::insert_into(admin_logs)
            .values(&NewAdminLog {
                admin_id: admin_id_query,
                action: action_name,
                description: description_text,
            })
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Audit entries for one order approval action, used by the tests and the
    /// admin activity view.
    pub async fn get_logs_for_admin(
        &self,
        admin_id_query: i32,
    ) -> Result<Vec<AdminLog>, result::Error> {
        use crate::data::models::schema::admin_logs::dsl::{admin_id, admin_logs, id};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        admin_logs
            .filter(admin_id.eq(admin_id_query))
            .order(id.desc())
            .load::<AdminLog>(&mut conn)
            .await
    }
}

impl Default for AdminRepo {
    fn default() -> Self {
        Self::new()
    }
}
