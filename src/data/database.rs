use diesel_async::AsyncMysqlConnection;
use diesel_async::pooled_connection::deadpool::{Object, Pool};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, deadpool};
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub struct Database {
    pool: Pool<AsyncMysqlConnection>,
}

impl Database {
    pub async fn new() -> Self {
        Database {
            pool: DB_POOL.clone(),
        }
    }

    pub async fn get_connection(
        &self,
    ) -> Result<Object<AsyncMysqlConnection>, deadpool::PoolError> {
        self.pool.get().await
    }
}

/// Lazily initialized global database connection pool
static DB_POOL: Lazy<Pool<AsyncMysqlConnection>> = Lazy::new(|| {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| database_url_from_parts());

    let config = AsyncDieselConnectionManager::<AsyncMysqlConnection>::new(database_url);
    let pool = Pool::builder(config)
        .build()
        .expect("Failed to create database connection pool");

    tracing::info!("DB connection pool created");

    pool
});

/// Builds a MySQL URL from the split DB_* variables when DATABASE_URL is not
/// set. DB_CHARSET is optional; the rest are required.
fn database_url_from_parts() -> String {
    let host = env::var("DB_HOST").expect("DATABASE_URL or DB_HOST must be set");
    let name = env::var("DB_NAME").expect("DB_NAME must be set");
    let user = env::var("DB_USER").expect("DB_USER must be set");
    let pass = env::var("DB_PASS").unwrap_or_default();

    match env::var("DB_CHARSET") {
        Ok(charset) if !charset.is_empty() => {
            format!("mysql://{user}:{pass}@{host}/{name}?charset={charset}")
        }
        _ => format!("mysql://{user}:{pass}@{host}/{name}"),
    }
}
