use bigdecimal::BigDecimal;
use diesel::result;
use diesel_async::RunQueryDsl;
use std::str::FromStr;
use storefront_server_lib::data::database::*;
use storefront_server_lib::data::models::address::NewAddress;
use storefront_server_lib::data::models::admin::NewAdmin;
use storefront_server_lib::data::models::order::NewOrder;
use storefront_server_lib::data::models::product::NewProduct;
use storefront_server_lib::data::models::user::NewUser;
use storefront_server_lib::data::repos::implementors::address_repo::AddressRepo;
use storefront_server_lib::data::repos::implementors::admin_repo::AdminRepo;
use storefront_server_lib::data::repos::implementors::order_repo::OrderRepo;
use storefront_server_lib::data::repos::implementors::product_repo::ProductRepo;
use storefront_server_lib::data::repos::implementors::user_repo::UserRepo;
use storefront_server_lib::data::repos::traits::repository::Repository;
use storefront_server_lib::services::admin_service::AdminService;
use storefront_server_lib::services::cart_service::CartService;
use storefront_server_lib::services::errors::AdminServiceError;
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

    use storefront_server_lib::data::models::schema::addresses::dsl::addresses;
    use storefront_server_lib::data::models::schema::admin_logs::dsl::admin_logs;
    use storefront_server_lib::data::models::schema::admins::dsl::admins;
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
    diesel::delete(admins).execute(&mut conn).await?;
    diesel::delete(products).execute(&mut conn).await?;
    diesel::delete(users).execute(&mut conn).await?;

    Ok(())
}

async fn create_test_user(email: &str) -> i32 {
    let repo = UserRepo::new();

    repo.add(NewUser {
        name: "Approval Tester",
        email,
        password_hash: "unused-in-admin-tests",
    })
    .await
    .expect("Failed to add user");

    repo.get_by_email(email)
        .await
        .expect("Failed to get user")
        .expect("User not found")
        .id
}

async fn create_test_admin(username: &str) -> i32 {
    let repo = AdminRepo::new();

    repo.add(NewAdmin {
        username,
        password_hash: "unused-in-admin-tests",
    })
    .await
    .expect("Failed to add admin");

    repo.get_by_username(username)
        .await
        .expect("Failed to get admin")
        .expect("Admin not found")
        .id
}

/// Walks a user through checkout and payment confirmation, returning an
/// order sitting in pending_verification.
async fn create_order_pending_verification(email: &str) -> (i32, i32) {
    let user_id = create_test_user(email).await;

    let address_id = AddressRepo::new()
        .add(NewAddress {
            user_id,
            full_name: "Approval Tester",
            address_line1: "12 Marina Road",
            city: "Lagos",
            state: "Lagos",
        })
        .await
        .expect("Failed to add address");

    let products = ProductRepo::new();
    let product_name = format!("ApprovalProduct-{email}");
    products
        .add(NewProduct {
            name: &product_name,
            description: None,
            price: BigDecimal::from_str("1000.00").unwrap(),
            category: None,
            sku: None,
            image_path: None,
        })
        .await
        .expect("Failed to add product");
    let product_id = products
        .get_by_name(&product_name)
        .await
        .expect("Failed to get product")
        .expect("Product not found")
        .id;

    CartService::new()
        .apply_delta(user_id, product_id, 1)
        .await
        .expect("Failed to fill cart");

    let service = OrderService::new();
    let placed = service
        .place_order(
            user_id,
            Checkout {
                address: ShippingAddress::Saved(address_id),
                delivery_option: "Mainland".to_string(),
                payment_method: "manual".to_string(),
            },
        )
        .await
        .expect("Checkout failed");

    service
        .confirm_payment(user_id, placed.order_id)
        .await
        .expect("Confirmation failed");

    (user_id, placed.order_id)
}

#[tokio::test]
#[serial_test::serial]
async fn test_approve_activates_order_and_logs_once() {
    setup().await.expect("Setup failed");

    let (_user_id, order_id) = create_order_pending_verification("approve@example.com").await;
    let admin_id = create_test_admin("approver").await;

    let service = AdminService::new();

    service
        .approve_order(admin_id, order_id)
        .await
        .expect("Approval failed");

    let order = OrderRepo::new()
        .get_by_id(order_id)
        .await
        .expect("Failed to load order")
        .expect("Order missing");
    assert_eq!(order.status, OrderStatus::Active.as_str());
    assert_eq!(order.approved_by, Some(admin_id));
    assert!(order.approved_at.is_some());

    let logs = AdminRepo::new()
        .get_logs_for_admin(admin_id)
        .await
        .expect("Failed to load logs");
    let approvals: Vec<_> = logs.iter().filter(|l| l.action == "approve_order").collect();
    assert_eq!(approvals.len(), 1);
}

#[tokio::test]
#[serial_test::serial]
async fn test_approve_requires_pending_verification() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("not_confirmed@example.com").await;
    let admin_id = create_test_admin("eager_approver").await;

    let address_id = AddressRepo::new()
        .add(NewAddress {
            user_id,
            full_name: "Approval Tester",
            address_line1: "12 Marina Road",
            city: "Lagos",
            state: "Lagos",
        })
        .await
        .expect("Failed to add address");

    let products = ProductRepo::new();
    products
        .add(NewProduct {
            name: "UnconfirmedProduct",
            description: None,
            price: BigDecimal::from_str("1000.00").unwrap(),
            category: None,
            sku: None,
            image_path: None,
        })
        .await
        .expect("Failed to add product");
    let product_id = products
        .get_by_name("UnconfirmedProduct")
        .await
        .expect("Failed to get product")
        .expect("Product not found")
        .id;

    CartService::new()
        .apply_delta(user_id, product_id, 1)
        .await
        .expect("Failed to fill cart");

    let placed = OrderService::new()
        .place_order(
            user_id,
            Checkout {
                address: ShippingAddress::Saved(address_id),
                delivery_option: "Mainland".to_string(),
                payment_method: "manual".to_string(),
            },
        )
        .await
        .expect("Checkout failed");

    // Buyer never reported the transfer; approval must refuse.
    let result = AdminService::new().approve_order(admin_id, placed.order_id).await;

    match result {
        Err(AdminServiceError::PreconditionFailed(message)) => {
            assert_eq!(message, "Order is not pending approval.");
        }
        other => panic!("Expected precondition failure, got {other:?}"),
    }

    let order = OrderRepo::new()
        .get_by_id(placed.order_id)
        .await
        .expect("Failed to load order")
        .expect("Order missing");
    assert_eq!(order.status, OrderStatus::AwaitingPayment.as_str());
    assert_eq!(order.approved_by, None);
}

#[tokio::test]
#[serial_test::serial]
async fn test_approve_missing_order_reports_not_found() {
    setup().await.expect("Setup failed");

    let admin_id = create_test_admin("lost_approver").await;

    let result = AdminService::new().approve_order(admin_id, 987654).await;

    match result {
        Err(AdminServiceError::PreconditionFailed(message)) => {
            assert_eq!(message, "Order not found.");
        }
        other => panic!("Expected precondition failure, got {other:?}"),
    }
}

#[tokio::test]
#[serial_test::serial]
async fn test_approve_rejects_non_manual_orders() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("card_order@example.com").await;
    let admin_id = create_test_admin("method_checker").await;

    let address_id = AddressRepo::new()
        .add(NewAddress {
            user_id,
            full_name: "Approval Tester",
            address_line1: "12 Marina Road",
            city: "Lagos",
            state: "Lagos",
        })
        .await
        .expect("Failed to add address");

    // Seed an order that claims a non-manual payment method.
    let db = Database::new().await;
    let mut conn = db
        .get_connection()
        .await
        .expect("Failed to get a database connection");

    use storefront_server_lib::data::models::schema::orders::dsl::orders;
    diesel::insert_into(orders)
        .values(&NewOrder {
            user_id,
            order_date: chrono::Utc::now().naive_utc(),
            total_amount: BigDecimal::from(1000),
            delivery_fee: BigDecimal::from(1500),
            status: OrderStatus::PendingVerification.as_str(),
            payment_method: "card",
            delivery_option: "Mainland",
            address_id,
        })
        .execute(&mut conn)
        .await
        .expect("Failed to seed order");

    let order_id: i32 =
        diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>("LAST_INSERT_ID()"))
            .get_result(&mut conn)
            .await
            .expect("Failed to read order id");

    let result = AdminService::new().approve_order(admin_id, order_id).await;

    match result {
        Err(AdminServiceError::PreconditionFailed(message)) => {
            assert_eq!(message, "Order is not a manual payment order.");
        }
        other => panic!("Expected precondition failure, got {other:?}"),
    }
}

#[tokio::test]
#[serial_test::serial]
async fn test_concurrent_approval_transitions_once() {
    setup().await.expect("Setup failed");

    let (_user_id, order_id) = create_order_pending_verification("race@example.com").await;
    let admin_a = create_test_admin("racer_a").await;
    let admin_b = create_test_admin("racer_b").await;

    let (first, second) = tokio::join!(
        async { AdminService::new().approve_order(admin_a, order_id).await },
        async { AdminService::new().approve_order(admin_b, order_id).await },
    );

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "Exactly one approval may win");

    let order = OrderRepo::new()
        .get_by_id(order_id)
        .await
        .expect("Failed to load order")
        .expect("Order missing");
    assert_eq!(order.status, OrderStatus::Active.as_str());

    let admin_repo = AdminRepo::new();
    let mut approvals = 0;
    for admin_id in [admin_a, admin_b] {
        approvals += admin_repo
            .get_logs_for_admin(admin_id)
            .await
            .expect("Failed to load logs")
            .iter()
            .filter(|l| l.action == "approve_order")
            .count();
    }
    assert_eq!(approvals, 1, "Exactly one audit entry may be written");
}

#[tokio::test]
#[serial_test::serial]
async fn test_pending_review_lists_only_reported_manual_orders() {
    setup().await.expect("Setup failed");

    let (_user_id, confirmed_order) =
        create_order_pending_verification("queued@example.com").await;

    // A second order that is still awaiting payment must not appear.
    let other_user = create_test_user("still_waiting@example.com").await;
    let address_id = AddressRepo::new()
        .add(NewAddress {
            user_id: other_user,
            full_name: "Approval Tester",
            address_line1: "12 Marina Road",
            city: "Lagos",
            state: "Lagos",
        })
        .await
        .expect("Failed to add address");

    let products = ProductRepo::new();
    products
        .add(NewProduct {
            name: "WaitingProduct",
            description: None,
            price: BigDecimal::from_str("1000.00").unwrap(),
            category: None,
            sku: None,
            image_path: None,
        })
        .await
        .expect("Failed to add product");
    let product_id = products
        .get_by_name("WaitingProduct")
        .await
        .expect("Failed to get product")
        .expect("Product not found")
        .id;

    CartService::new()
        .apply_delta(other_user, product_id, 1)
        .await
        .expect("Failed to fill cart");
    OrderService::new()
        .place_order(
            other_user,
            Checkout {
                address: ShippingAddress::Saved(address_id),
                delivery_option: "Mainland".to_string(),
                payment_method: "manual".to_string(),
            },
        )
        .await
        .expect("Checkout failed");

    let queue = AdminService::new()
        .pending_review()
        .await
        .expect("Failed to load queue");

    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].0.id, confirmed_order);
    assert_eq!(queue[0].1.email, "queued@example.com");
}
