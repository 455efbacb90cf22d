use crate::api::extractors::AdminIdentity;
use crate::api::request::{CreateProductRequest, ProductListQuery, UpdateProductRequest};
use crate::api::response::{MessageResponse, ProductResponse};
use crate::services::errors::ProductServiceError;
use crate::services::product_service::{
    CatalogQuery, ProductChanges, ProductForm, ProductService,
};
use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Browse the catalog with search, category filter, whitelisted sort and
/// pagination
pub async fn get_products(Query(params): Query<ProductListQuery>) -> impl IntoResponse {
    let service = ProductService::new();

    match service
        .list(CatalogQuery {
            search: params.search,
            category: params.category,
            sort_by: params.sort,
            sort_order: params.order,
            page: params.page.unwrap_or(1),
        })
        .await
    {
        Ok(products) => {
            let response: Vec<ProductResponse> =
                products.into_iter().map(ProductResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Distinct category labels for the storefront filter
pub async fn get_categories() -> impl IntoResponse {
    let service = ProductService::new();

    match service.get_categories().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Get a product by ID
pub async fn get_product_by_id(Path(product_id): Path<i32>) -> impl IntoResponse {
    let service = ProductService::new();

    match service.get_product(product_id).await {
        Ok(product) => (StatusCode::OK, Json(ProductResponse::from(product))).into_response(),
        Err(e @ ProductServiceError::ProductNotFound) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Add a product to the catalog (admin)
pub async fn create_product(
    _identity: AdminIdentity,
    Json(payload): Json<CreateProductRequest>,
) -> impl IntoResponse {
    let service = ProductService::new();

    match service
        .create_product(ProductForm {
            name: payload.name,
            description: payload.description,
            price: payload.price,
            category: payload.category,
            sku: payload.sku,
            image_path: payload.image_path,
        })
        .await
    {
        Ok(()) => (
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "Product created.".to_string(),
            }),
        )
            .into_response(),
        Err(
            e @ (ProductServiceError::MissingName | ProductServiceError::InvalidPrice),
        ) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Update a catalog product (admin)
pub async fn update_product(
    _identity: AdminIdentity,
    Path(product_id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> impl IntoResponse {
    let service = ProductService::new();

    match service
        .update_product(
            product_id,
            ProductChanges {
                name: payload.name,
                description: payload.description,
                price: payload.price,
                category: payload.category,
                sku: payload.sku,
                image_path: payload.image_path,
            },
        )
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Product updated.".to_string(),
            }),
        )
            .into_response(),
        Err(e @ ProductServiceError::ProductNotFound) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(
            e @ (ProductServiceError::MissingName | ProductServiceError::InvalidPrice),
        ) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Remove a product from the catalog (admin)
pub async fn delete_product(
    _identity: AdminIdentity,
    Path(product_id): Path<i32>,
) -> impl IntoResponse {
    let service = ProductService::new();

    match service.delete_product(product_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Product deleted.".to_string(),
            }),
        )
            .into_response(),
        Err(e @ ProductServiceError::ProductNotFound) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
