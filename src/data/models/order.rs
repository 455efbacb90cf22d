use crate::data::models::schema::*;
use crate::data::models::user::User;
use bigdecimal::BigDecimal;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub order_date: chrono::NaiveDateTime,
    pub total_amount: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub status: String,
    pub payment_method: String,
    pub delivery_option: String,
    pub address_id: i32,
    pub approved_at: Option<chrono::NaiveDateTime>,
    pub approved_by: Option<i32>,
    pub payment_confirmed_at: Option<chrono::NaiveDateTime>,
    pub created_at: Option<chrono::NaiveDateTime>,
}

impl Order {
    /// Grand total is always derived from the captured amounts, never stored.
    pub fn grand_total(&self) -> BigDecimal {
        &self.total_amount + &self.delivery_fee
    }
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = orders)]
pub struct NewOrder<'a> {
    pub user_id: i32,
    pub order_date: chrono::NaiveDateTime,
    pub total_amount: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub status: &'a str,
    pub payment_method: &'a str,
    pub delivery_option: &'a str,
    pub address_id: i32,
}
