use crate::data::models::product::{NewProduct, Product, UpdateProduct};
use crate::data::repos::implementors::product_repo::{ProductQuery, ProductRepo};
use crate::data::repos::traits::repository::Repository;
use crate::services::errors::ProductServiceError;
use bigdecimal::BigDecimal;

/// Catalog listing request, pre-validation. Sort fields outside the repo's
/// allow-list fall back to the default sort.
#[derive(Debug, Default)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: i64,
}

#[derive(Debug)]
pub struct ProductForm {
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Debug, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub image_path: Option<String>,
}

pub struct ProductService;

impl ProductService {
    pub fn new() -> Self {
        ProductService
    }

    pub async fn list(&self, query: CatalogQuery) -> Result<Vec<Product>, ProductServiceError> {
        const PAGE_SIZE: i64 = 20;

        let page = query.page.max(1);
        ProductRepo::new()
            .search(ProductQuery {
                search: query.search.as_deref(),
                category: query.category.as_deref(),
                sort_by: query.sort_by.as_deref(),
                sort_order: query.sort_order.as_deref(),
                limit: PAGE_SIZE,
                offset: (page - 1) * PAGE_SIZE,
            })
            .await
            .map_err(|_| ProductServiceError::Storage)
    }

    pub async fn get_categories(&self) -> Result<Vec<String>, ProductServiceError> {
        ProductRepo::new()
            .get_categories()
            .await
            .map_err(|_| ProductServiceError::Storage)
    }

    pub async fn get_product(&self, product_id: i32) -> Result<Product, ProductServiceError> {
        ProductRepo::new()
            .get_by_id(product_id)
            .await
            .map_err(|_| ProductServiceError::Storage)?
            .ok_or(ProductServiceError::ProductNotFound)
    }

    pub async fn create_product(&self, form: ProductForm) -> Result<(), ProductServiceError> {
        if form.name.trim().is_empty() {
            return Err(ProductServiceError::MissingName);
        }
        if form.price <= BigDecimal::from(0) {
            return Err(ProductServiceError::InvalidPrice);
        }

        ProductRepo::new()
            .add(NewProduct {
                name: form.name.trim(),
                description: form.description.as_deref(),
                price: form.price.clone(),
                category: form.category.as_deref(),
                sku: form.sku.as_deref(),
                image_path: form.image_path.as_deref(),
            })
            .await
            .map_err(|_| ProductServiceError::Storage)
    }

    pub async fn update_product(
        &self,
        product_id: i32,
        changes: ProductChanges,
    ) -> Result<(), ProductServiceError> {
        if let Some(name) = &changes.name {
            if name.trim().is_empty() {
                return Err(ProductServiceError::MissingName);
            }
        }
        if let Some(price) = &changes.price {
            if *price <= BigDecimal::from(0) {
                return Err(ProductServiceError::InvalidPrice);
            }
        }

        let repo = ProductRepo::new();

        repo.get_by_id(product_id)
            .await
            .map_err(|_| ProductServiceError::Storage)?
            .ok_or(ProductServiceError::ProductNotFound)?;

        repo.update(
            product_id,
            UpdateProduct {
                name: changes.name.as_deref(),
                description: changes.description.as_deref(),
                price: changes.price.clone(),
                category: changes.category.as_deref(),
                sku: changes.sku.as_deref(),
                image_path: changes.image_path.as_deref(),
            },
        )
        .await
        .map_err(|_| ProductServiceError::Storage)
    }

    pub async fn delete_product(&self, product_id: i32) -> Result<(), ProductServiceError> {
        let repo = ProductRepo::new();

        repo.get_by_id(product_id)
            .await
            .map_err(|_| ProductServiceError::Storage)?
            .ok_or(ProductServiceError::ProductNotFound)?;

        repo.delete(product_id)
            .await
            .map_err(|_| ProductServiceError::Storage)
    }
}

impl Default for ProductService {
    fn default() -> Self {
        Self::new()
    }
}
