use crate::data::database::Database;
use crate::data::models::product::{NewProduct, Product, UpdateProduct};
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};

/// Catalog listing filters. `sort_by`/`sort_order` are validated against an
/// explicit allow-list before they touch the query; anything else falls back
/// to the default name sort.
#[derive(Debug, Default)]
pub struct ProductQuery<'a> {
    pub search: Option<&'a str>,
    pub category: Option<&'a str>,
    pub sort_by: Option<&'a str>,
    pub sort_order: Option<&'a str>,
    pub limit: i64,
    pub offset: i64,
}

pub struct ProductRepo {}

impl ProductRepo {
    pub fn new() -> Self {
        ProductRepo {}
    }

    pub async fn exists(&self, id_query: i32) -> Result<bool, result::Error> {
        Ok(self.get_by_id(id_query).await?.is_some())
    }

    pub async fn get_by_name(&self, name_query: &str) -> Result<Option<Product>, result::Error> {
        use crate::data::models::schema::products::dsl::{name, products};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match products
            .filter(name.eq(name_query))
            .first::<Product>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Storefront listing with search, category filter, whitelisted sorting
    /// and pagination.
    pub async fn search(&self, params: ProductQuery<'_>) -> Result<Vec<Product>, result::Error> {
        use crate::data::models::schema::products::dsl::{
            category, created_at, name, price, products,
        };

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        let mut query = products.into_boxed();

        if let Some(term) = params.search {
            if !term.is_empty() {
                query = query.filter(name.like(format!("%{term}%")));
            }
        }

        if let Some(wanted) = params.category {
            if !wanted.is_empty() {
                query = query.filter(category.eq(wanted.to_string()));
            }
        }

        // Sort columns come from the client; only the allow-listed pairs map
        // onto order clauses.
        let descending = matches!(params.sort_order, Some("desc") | Some("DESC"));
        query = match params.sort_by {
            Some("price") => {
                if descending {
                    query.order(price.desc())
                } else {
                    query.order(price.asc())
                }
            }
            Some("created_at") => {
                if descending {
                    query.order(created_at.desc())
                } else {
                    query.order(created_at.asc())
                }
            }
            _ => {
                if descending {
                    query.order(name.desc())
                } else {
                    query.order(name.asc())
                }
            }
        };

        query
            .limit(params.limit)
            .offset(params.offset)
            .load::<Product>(&mut conn)
            .await
    }

    /// Distinct category labels for the storefront filter.
    pub async fn get_categories(&self) -> Result<Vec<String>, result::Error> {
        use crate::data::models::schema::products::dsl::{category, products};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        let values: Vec<Option<String>> = products
            .select(category)
            .distinct()
            .filter(category.is_not_null())
            .order(category.asc())
            .load::<Option<String>>(&mut conn)
            .await?;

        Ok(values.into_iter().flatten().filter(|c| !c.is_empty()).collect())
    }
}

#[async_trait]
impl Repository for ProductRepo {
    type Id = i32;
    type Item = Product;
    type NewItem<'a> = NewProduct<'a>;
    type UpdateForm<'a> = UpdateProduct<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        use crate::data::models::schema::products::dsl::{created_at, products};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match products
            .order(created_at.desc())
            .load::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id_query: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::products::dsl::{id, products};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match products
            .filter(id.eq(id_query))
            .first::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<(), result::Error> {
        use crate::data::models::schema::products::dsl::products;

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(products)
                    .values(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn update<'a>(
        &self,
        id_query: Self::Id,
        item: Self::UpdateForm<'a>,
    ) -> Result<(), result::Error> {
        use crate::data::models::schema::products::dsl::{id, products};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                diesel::update(products.filter(id.eq(id_query)))
                    .set(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id_query: Self::Id) -> Result<(), result::Error> {
        use crate::data::models::schema::products::dsl::{id, products};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                diesel::delete(products.filter(id.eq(id_query)))
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}

impl Default for ProductRepo {
    fn default() -> Self {
        Self::new()
    }
}
