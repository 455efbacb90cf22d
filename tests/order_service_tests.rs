use bigdecimal::BigDecimal;
use diesel::result;
use diesel_async::RunQueryDsl;
use std::str::FromStr;
use storefront_server_lib::data::database::*;
use storefront_server_lib::data::models::address::NewAddress;
use storefront_server_lib::data::models::product::{NewProduct, UpdateProduct};
use storefront_server_lib::data::models::user::NewUser;
use storefront_server_lib::data::repos::implementors::address_repo::AddressRepo;
use storefront_server_lib::data::repos::implementors::cart_repo::CartRepo;
use storefront_server_lib::data::repos::implementors::order_repo::OrderRepo;
use storefront_server_lib::data::repos::implementors::product_repo::ProductRepo;
use storefront_server_lib::data::repos::implementors::user_repo::UserRepo;
use storefront_server_lib::data::repos::traits::repository::Repository;
use storefront_server_lib::services::cart_service::CartService;
use storefront_server_lib::services::errors::OrderServiceError;
use storefront_server_lib::services::order_service::{
    Checkout, OrderService, OrderStatus, ShippingAddress,
};

fn configure_environment() {
    std::env::set_var("JWT_SECRET", "test-secret");
    std::env::set_var("BANK_NAME", "First Bank");
    std::env::set_var("BANK_ACCOUNT_NUMBER", "0123456789");
    std::env::set_var("BANK_ACCOUNT_NAME", "Storefront Ltd");
    std::env::set_var("PAYMENT_CURRENCY", "NGN");
    std::env::set_var("PAYMENT_DEADLINE_DAYS", "7");
}

async fn setup() -> Result<(), result::Error> {
    configure_environment();

    let db = Database::new().await;

    let mut conn = db
        .get_connection()
        .await
        .expect("Failed to get a database connection");

    use storefront_server_lib::data::models::schema::admin_logs::dsl::admin_logs;
    use storefront_server_lib::data::models::schema::addresses::dsl::addresses;
    use storefront_server_lib::data::models::schema::cart::dsl::cart;
    use storefront_server_lib::data::models::schema::order_details::dsl::order_details;
    use storefront_server_lib::data::models::schema::orders::dsl::orders;
    use storefront_server_lib::data::models::schema::products::dsl::products;
    use storefront_server_lib::data::models::schema::users::dsl::users;

    diesel::delete(admin_logs).execute(&mut conn).await?;
    diesel::delete(order_details).execute(&mut conn).await?;
    diesel::delete(orders).execute(&mut conn).await?;
    diesel::delete(cart).execute(&mut conn).await?;
    diesel::delete(addresses).execute(&mut conn).await?;
    diesel::delete(products).execute(&mut conn).await?;
    diesel::delete(users).execute(&mut conn).await?;

    Ok(())
}

async fn create_test_user(email: &str) -> i32 {
    let repo = UserRepo::new();

    repo.add(NewUser {
        name: "Order Tester",
        email,
        password_hash: "unused-in-order-tests",
    })
    .await
    .expect("Failed to add user");

    repo.get_by_email(email)
        .await
        .expect("Failed to get user")
        .expect("User not found")
        .id
}

async fn create_test_product(name: &str, price: &str) -> i32 {
    let repo = ProductRepo::new();

    repo.add(NewProduct {
        name,
        description: Some("Test product for the order suite"),
        price: BigDecimal::from_str(price).unwrap(),
        category: None,
        sku: None,
        image_path: None,
    })
    .await
    .expect("Failed to add product");

    repo.get_by_name(name)
        .await
        .expect("Failed to get product")
        .expect("Product not found")
        .id
}

async fn create_test_address(user_id: i32) -> i32 {
    AddressRepo::new()
        .add(NewAddress {
            user_id,
            full_name: "Order Tester",
            address_line1: "12 Marina Road",
            city: "Lagos",
            state: "Lagos",
        })
        .await
        .expect("Failed to add address")
}

fn manual_checkout(address_id: i32, delivery_option: &str) -> Checkout {
    Checkout {
        address: ShippingAddress::Saved(address_id),
        delivery_option: delivery_option.to_string(),
        payment_method: "manual".to_string(),
    }
}

#[tokio::test]
#[serial_test::serial]
async fn test_place_order_on_empty_cart_fails() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("empty_cart@example.com").await;
    let address_id = create_test_address(user_id).await;

    let service = OrderService::new();

    let result = service
        .place_order(user_id, manual_checkout(address_id, "Mainland"))
        .await;

    assert!(matches!(result, Err(OrderServiceError::EmptyCart)));

    let orders = service
        .get_orders(user_id, None, 1)
        .await
        .expect("Failed to list orders");
    assert!(orders.is_empty(), "No order row may be created");
}

#[tokio::test]
#[serial_test::serial]
async fn test_place_order_mainland_scenario() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("mainland@example.com").await;
    let address_id = create_test_address(user_id).await;
    let product_a = create_test_product("Hibiscus tea", "500.00").await;
    let product_b = create_test_product("Shea butter", "1500.00").await;

    let cart = CartService::new();
    cart.apply_delta(user_id, product_a, 2)
        .await
        .expect("Failed to add product A");
    cart.apply_delta(user_id, product_b, 1)
        .await
        .expect("Failed to add product B");

    let service = OrderService::new();
    let placed = service
        .place_order(user_id, manual_checkout(address_id, "Mainland"))
        .await
        .expect("Checkout failed");

    assert_eq!(placed.total_amount, BigDecimal::from(2500));
    assert_eq!(placed.delivery_fee, BigDecimal::from(1500));
    assert_eq!(placed.grand_total, BigDecimal::from(4000));
    assert_eq!(placed.instructions.reference, format!("Order #{}", placed.order_id));
    assert_eq!(placed.instructions.bank_name, "First Bank");

    let (order, details) = service
        .get_order(user_id, placed.order_id)
        .await
        .expect("Failed to load order");
    assert_eq!(order.status, OrderStatus::AwaitingPayment.as_str());
    assert_eq!(order.payment_method, "manual");
    assert_eq!(order.delivery_option, "Mainland");

    // Line totals must add up to the captured total.
    let line_sum: BigDecimal = details.iter().map(|(d, _)| d.line_total()).sum();
    assert_eq!(line_sum, order.total_amount);

    // The cart was cleared in the same transaction.
    let state = cart.get_cart(user_id).await.expect("Failed to read cart");
    assert!(state.lines.is_empty());
}

#[tokio::test]
#[serial_test::serial]
async fn test_order_totals_survive_catalog_reprice() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("reprice@example.com").await;
    let address_id = create_test_address(user_id).await;
    let product_id = create_test_product("RepriceProduct", "800.00").await;

    CartService::new()
        .apply_delta(user_id, product_id, 1)
        .await
        .expect("Failed to fill cart");

    let service = OrderService::new();
    let placed = service
        .place_order(user_id, manual_checkout(address_id, "Pick-up"))
        .await
        .expect("Checkout failed");

    ProductRepo::new()
        .update(
            product_id,
            UpdateProduct {
                name: None,
                description: None,
                price: Some(BigDecimal::from_str("9999.00").unwrap()),
                category: None,
                sku: None,
                image_path: None,
            },
        )
        .await
        .expect("Failed to reprice product");

    let (order, details) = service
        .get_order(user_id, placed.order_id)
        .await
        .expect("Failed to load order");

    assert_eq!(order.total_amount, BigDecimal::from(800));
    assert_eq!(details[0].0.price, BigDecimal::from(800));
    assert_eq!(order.grand_total(), BigDecimal::from(800));
}

#[tokio::test]
#[serial_test::serial]
async fn test_unknown_delivery_option_rejected() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("unknown_delivery@example.com").await;
    let address_id = create_test_address(user_id).await;
    let product_id = create_test_product("DeliveryProduct", "100.00").await;

    CartService::new()
        .apply_delta(user_id, product_id, 1)
        .await
        .expect("Failed to fill cart");

    let result = OrderService::new()
        .place_order(user_id, manual_checkout(address_id, "Teleport"))
        .await;

    assert!(matches!(
        result,
        Err(OrderServiceError::UnknownDeliveryOption(label)) if label == "Teleport"
    ));
}

#[tokio::test]
#[serial_test::serial]
async fn test_non_manual_payment_rejected() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("card_payer@example.com").await;
    let address_id = create_test_address(user_id).await;
    let product_id = create_test_product("CardProduct", "100.00").await;

    CartService::new()
        .apply_delta(user_id, product_id, 1)
        .await
        .expect("Failed to fill cart");

    let result = OrderService::new()
        .place_order(
            user_id,
            Checkout {
                address: ShippingAddress::Saved(address_id),
                delivery_option: "Mainland".to_string(),
                payment_method: "card".to_string(),
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(OrderServiceError::UnsupportedPaymentMethod(method)) if method == "card"
    ));
}

#[tokio::test]
#[serial_test::serial]
async fn test_foreign_address_rejected() {
    setup().await.expect("Setup failed");

    let buyer_id = create_test_user("buyer@example.com").await;
    let other_id = create_test_user("other@example.com").await;
    let foreign_address = create_test_address(other_id).await;
    let product_id = create_test_product("AddressProduct", "100.00").await;

    CartService::new()
        .apply_delta(buyer_id, product_id, 1)
        .await
        .expect("Failed to fill cart");

    let result = OrderService::new()
        .place_order(buyer_id, manual_checkout(foreign_address, "Mainland"))
        .await;

    assert!(matches!(result, Err(OrderServiceError::AddressNotFound)));
}

#[tokio::test]
#[serial_test::serial]
async fn test_checkout_with_new_address_stores_it() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("new_address@example.com").await;
    let product_id = create_test_product("NewAddressProduct", "100.00").await;

    CartService::new()
        .apply_delta(user_id, product_id, 1)
        .await
        .expect("Failed to fill cart");

    let service = OrderService::new();
    let placed = service
        .place_order(
            user_id,
            Checkout {
                address: ShippingAddress::New {
                    full_name: "Order Tester".to_string(),
                    address_line1: "5 Allen Avenue".to_string(),
                    city: "Ikeja".to_string(),
                    state: "Lagos".to_string(),
                },
                delivery_option: "Island".to_string(),
                payment_method: "manual".to_string(),
            },
        )
        .await
        .expect("Checkout failed");

    let (order, _) = service
        .get_order(user_id, placed.order_id)
        .await
        .expect("Failed to load order");

    let saved = AddressRepo::new()
        .get_for_user(order.address_id, user_id)
        .await
        .expect("Failed to load address")
        .expect("Address missing");
    assert_eq!(saved.city, "Ikeja");
}

#[tokio::test]
#[serial_test::serial]
async fn test_confirm_payment_moves_to_pending_verification() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("confirmer@example.com").await;
    let address_id = create_test_address(user_id).await;
    let product_id = create_test_product("ConfirmProduct", "100.00").await;

    CartService::new()
        .apply_delta(user_id, product_id, 1)
        .await
        .expect("Failed to fill cart");

    let service = OrderService::new();
    let placed = service
        .place_order(user_id, manual_checkout(address_id, "Mainland"))
        .await
        .expect("Checkout failed");

    service
        .confirm_payment(user_id, placed.order_id)
        .await
        .expect("Confirmation failed");

    let (order, _) = service
        .get_order(user_id, placed.order_id)
        .await
        .expect("Failed to load order");
    assert_eq!(order.status, OrderStatus::PendingVerification.as_str());
    assert!(order.payment_confirmed_at.is_some());
}

#[tokio::test]
#[serial_test::serial]
async fn test_confirm_payment_by_non_owner_fails_without_mutation() {
    setup().await.expect("Setup failed");

    let owner_id = create_test_user("owner@example.com").await;
    let stranger_id = create_test_user("stranger@example.com").await;
    let address_id = create_test_address(owner_id).await;
    let product_id = create_test_product("OwnershipProduct", "100.00").await;

    CartService::new()
        .apply_delta(owner_id, product_id, 1)
        .await
        .expect("Failed to fill cart");

    let service = OrderService::new();
    let placed = service
        .place_order(owner_id, manual_checkout(address_id, "Mainland"))
        .await
        .expect("Checkout failed");

    let result = service.confirm_payment(stranger_id, placed.order_id).await;
    assert!(matches!(
        result,
        Err(OrderServiceError::PreconditionFailed(_))
    ));

    let (order, _) = service
        .get_order(owner_id, placed.order_id)
        .await
        .expect("Failed to load order");
    assert_eq!(order.status, OrderStatus::AwaitingPayment.as_str());
}

#[tokio::test]
#[serial_test::serial]
async fn test_confirm_payment_is_not_repeatable() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("double_confirm@example.com").await;
    let address_id = create_test_address(user_id).await;
    let product_id = create_test_product("DoubleConfirmProduct", "100.00").await;

    CartService::new()
        .apply_delta(user_id, product_id, 1)
        .await
        .expect("Failed to fill cart");

    let service = OrderService::new();
    let placed = service
        .place_order(user_id, manual_checkout(address_id, "Mainland"))
        .await
        .expect("Checkout failed");

    service
        .confirm_payment(user_id, placed.order_id)
        .await
        .expect("First confirmation failed");

    let second = service.confirm_payment(user_id, placed.order_id).await;
    assert!(matches!(
        second,
        Err(OrderServiceError::PreconditionFailed(_))
    ));
}

#[tokio::test]
#[serial_test::serial]
async fn test_cancel_before_and_after_payment_report() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("canceller@example.com").await;
    let address_id = create_test_address(user_id).await;
    let product_id = create_test_product("CancelProduct", "100.00").await;

    let cart = CartService::new();
    let service = OrderService::new();

    // Cancel straight from awaiting_payment.
    cart.apply_delta(user_id, product_id, 1)
        .await
        .expect("Failed to fill cart");
    let first = service
        .place_order(user_id, manual_checkout(address_id, "Mainland"))
        .await
        .expect("Checkout failed");
    service
        .cancel_order(user_id, first.order_id)
        .await
        .expect("Cancellation from awaiting_payment failed");

    // Cancel from pending_verification.
    cart.apply_delta(user_id, product_id, 1)
        .await
        .expect("Failed to refill cart");
    let second = service
        .place_order(user_id, manual_checkout(address_id, "Mainland"))
        .await
        .expect("Checkout failed");
    service
        .confirm_payment(user_id, second.order_id)
        .await
        .expect("Confirmation failed");
    service
        .cancel_order(user_id, second.order_id)
        .await
        .expect("Cancellation from pending_verification failed");

    let (order, _) = service
        .get_order(user_id, second.order_id)
        .await
        .expect("Failed to load order");
    assert_eq!(order.status, OrderStatus::Cancelled.as_str());

    // A cancelled order cannot be cancelled again.
    let again = service.cancel_order(user_id, second.order_id).await;
    assert!(matches!(
        again,
        Err(OrderServiceError::PreconditionFailed(_))
    ));
}

#[tokio::test]
#[serial_test::serial]
async fn test_reorder_restores_cart_and_skips_missing_products() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("reorderer@example.com").await;
    let address_id = create_test_address(user_id).await;
    let product_a = create_test_product("ReorderKeep", "500.00").await;
    let product_b = create_test_product("ReorderGone", "1500.00").await;

    let cart = CartService::new();
    cart.apply_delta(user_id, product_a, 2)
        .await
        .expect("Failed to add product A");
    cart.apply_delta(user_id, product_b, 1)
        .await
        .expect("Failed to add product B");

    let service = OrderService::new();
    let placed = service
        .place_order(user_id, manual_checkout(address_id, "Mainland"))
        .await
        .expect("Checkout failed");

    // Order snapshot keeps the line even after the product disappears.
    ProductRepo::new()
        .delete(product_b)
        .await
        .expect("Failed to delete product");
    let rows = OrderRepo::new()
        .get_detail_rows(placed.order_id)
        .await
        .expect("Failed to read details");
    assert_eq!(rows.len(), 2);

    let added = service
        .reorder(user_id, placed.order_id)
        .await
        .expect("Reorder failed");
    assert_eq!(added, 1, "Only the surviving product is re-added");

    let state = cart.get_cart(user_id).await.expect("Failed to read cart");
    assert_eq!(state.lines.len(), 1);
    assert_eq!(state.lines[0].product_id, product_a);
    assert_eq!(state.lines[0].quantity, 2);

    let missing = CartRepo::new()
        .get_line(user_id, product_b)
        .await
        .expect("Failed to read line");
    assert!(missing.is_none());
}
