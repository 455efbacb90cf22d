use crate::data::models::product::Product;
use crate::data::models::schema::*;
use crate::data::models::user::User;
use diesel::prelude::*;

/// One product-quantity entry in a user's cart. Unique per
/// (user_id, product_id); a row never persists with quantity <= 0.
#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug)]
#[diesel(table_name = cart)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(belongs_to(Product, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct CartLine {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub added_at: Option<chrono::NaiveDateTime>,
}
