diesel::table! {
    addresses (id) {
        id -> Integer,
        user_id -> Integer,
        #[max_length = 100]
        full_name -> Varchar,
        #[max_length = 255]
        address_line1 -> Varchar,
        #[max_length = 100]
        city -> Varchar,
        #[max_length = 100]
        state -> Varchar,
        created_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    admin_logs (id) {
        id -> Integer,
        admin_id -> Integer,
        #[max_length = 50]
        action -> Varchar,
        description -> Nullable<Text>,
        created_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    admins (id) {
        id -> Integer,
        #[max_length = 50]
        username -> Varchar,
        #[max_length = 255]
        password_hash -> Varchar,
        created_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    cart (id) {
        id -> Integer,
        user_id -> Integer,
        product_id -> Integer,
        quantity -> Integer,
        added_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    order_details (id) {
        id -> Integer,
        order_id -> Integer,
        product_id -> Integer,
        quantity -> Integer,
        price -> Decimal,
    }
}

diesel::table! {
    orders (id) {
        id -> Integer,
        user_id -> Integer,
        order_date -> Timestamp,
        total_amount -> Decimal,
        delivery_fee -> Decimal,
        #[max_length = 32]
        status -> Varchar,
        #[max_length = 32]
        payment_method -> Varchar,
        #[max_length = 64]
        delivery_option -> Varchar,
        address_id -> Integer,
        approved_at -> Nullable<Timestamp>,
        approved_by -> Nullable<Integer>,
        payment_confirmed_at -> Nullable<Timestamp>,
        created_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    products (id) {
        id -> Integer,
        #[max_length = 255]
        name -> Varchar,
        description -> Nullable<Text>,
        price -> Decimal,
        #[max_length = 100]
        category -> Nullable<Varchar>,
        #[max_length = 64]
        sku -> Nullable<Varchar>,
        #[max_length = 255]
        image_path -> Nullable<Varchar>,
        created_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    users (id) {
        id -> Integer,
        #[max_length = 100]
        name -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 255]
        password_hash -> Varchar,
        created_at -> Nullable<Timestamp>,
    }
}

diesel::joinable!(addresses -> users (user_id));
diesel::joinable!(admin_logs -> admins (admin_id));
diesel::joinable!(cart -> products (product_id));
diesel::joinable!(cart -> users (user_id));
diesel::joinable!(order_details -> orders (order_id));
diesel::joinable!(order_details -> products (product_id));
diesel::joinable!(orders -> addresses (address_id));
diesel::joinable!(orders -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    addresses,
    admin_logs,
    admins,
    cart,
    order_details,
    orders,
    products,
    users,
);
