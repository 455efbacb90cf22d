use bigdecimal::BigDecimal;
use diesel::result;
use diesel_async::RunQueryDsl;
use std::str::FromStr;
use storefront_server_lib::data::database::*;
use storefront_server_lib::data::models::product::{NewProduct, UpdateProduct};
use storefront_server_lib::data::repos::implementors::product_repo::{ProductQuery, ProductRepo};
use storefront_server_lib::data::repos::traits::repository::Repository;

async fn setup() -> Result<(), result::Error> {
    std::env::set_var("JWT_SECRET", "test-secret");

    let db = Database::new().await;

    let mut conn = db
        .get_connection()
        .await
        .expect("Failed to get a database connection");

    use storefront_server_lib::data::models::schema::cart::dsl::cart;
    use storefront_server_lib::data::models::schema::order_details::dsl::order_details;
    use storefront_server_lib::data::models::schema::products::dsl::products;

    diesel::delete(order_details).execute(&mut conn).await?;
    diesel::delete(cart).execute(&mut conn).await?;
    diesel::delete(products).execute(&mut conn).await?;

    Ok(())
}

async fn add_product(name: &str, price: &str, category: Option<&str>) {
    ProductRepo::new()
        .add(NewProduct {
            name,
            description: None,
            price: BigDecimal::from_str(price).unwrap(),
            category,
            sku: None,
            image_path: None,
        })
        .await
        .expect("Failed to add product");
}

#[tokio::test]
#[serial_test::serial]
async fn test_product_crud_roundtrip() {
    setup().await.expect("Setup failed");

    let repo = ProductRepo::new();

    assert!(repo.get_all().await.expect("get_all failed").is_none());

    add_product("CrudProduct", "120.00", Some("teas")).await;

    let product = repo
        .get_by_name("CrudProduct")
        .await
        .expect("Failed to get product")
        .expect("Product not found");
    assert_eq!(product.price, BigDecimal::from(120));
    assert_eq!(product.category.as_deref(), Some("teas"));

    repo.update(
        product.id,
        UpdateProduct {
            name: None,
            description: Some("Updated description"),
            price: Some(BigDecimal::from_str("150.00").unwrap()),
            category: None,
            sku: None,
            image_path: None,
        },
    )
    .await
    .expect("Failed to update product");

    let updated = repo
        .get_by_id(product.id)
        .await
        .expect("Failed to get product")
        .expect("Product not found");
    assert_eq!(updated.price, BigDecimal::from(150));
    assert_eq!(updated.description.as_deref(), Some("Updated description"));

    repo.delete(product.id).await.expect("Failed to delete");
    assert!(repo
        .get_by_id(product.id)
        .await
        .expect("Failed to query")
        .is_none());
}

#[tokio::test]
#[serial_test::serial]
async fn test_search_sorts_only_by_allow_listed_columns() {
    setup().await.expect("Setup failed");

    add_product("Banga spice", "300.00", Some("spices")).await;
    add_product("Agege bread", "500.00", Some("bakery")).await;
    add_product("Cocoa powder", "100.00", Some("spices")).await;

    let repo = ProductRepo::new();

    let by_price_desc = repo
        .search(ProductQuery {
            search: None,
            category: None,
            sort_by: Some("price"),
            sort_order: Some("desc"),
            limit: 10,
            offset: 0,
        })
        .await
        .expect("Search failed");
    let names: Vec<&str> = by_price_desc.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Agege bread", "Banga spice", "Cocoa powder"]);

    // An unknown sort column must not reach the SQL; the default name sort
    // applies instead.
    let by_bogus = repo
        .search(ProductQuery {
            search: None,
            category: None,
            sort_by: Some("price; DROP TABLE products"),
            sort_order: Some("desc"),
            limit: 10,
            offset: 0,
        })
        .await
        .expect("Search failed");
    let names: Vec<&str> = by_bogus.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Cocoa powder", "Banga spice", "Agege bread"]);
}

#[tokio::test]
#[serial_test::serial]
async fn test_search_filters_and_categories() {
    setup().await.expect("Setup failed");

    add_product("Banga spice", "300.00", Some("spices")).await;
    add_product("Agege bread", "500.00", Some("bakery")).await;
    add_product("Cocoa powder", "100.00", Some("spices")).await;

    let repo = ProductRepo::new();

    let spices = repo
        .search(ProductQuery {
            search: None,
            category: Some("spices"),
            sort_by: None,
            sort_order: None,
            limit: 10,
            offset: 0,
        })
        .await
        .expect("Search failed");
    assert_eq!(spices.len(), 2);

    let matching = repo
        .search(ProductQuery {
            search: Some("bread"),
            category: None,
            sort_by: None,
            sort_order: None,
            limit: 10,
            offset: 0,
        })
        .await
        .expect("Search failed");
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].name, "Agege bread");

    let categories = repo.get_categories().await.expect("Failed to get categories");
    assert_eq!(categories, vec!["bakery".to_string(), "spices".to_string()]);
}
