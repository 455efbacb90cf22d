use crate::data::models::schema::*;
use crate::data::models::user::User;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = addresses)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Address {
    pub id: i32,
    pub user_id: i32,
    pub full_name: String,
    pub address_line1: String,
    pub city: String,
    pub state: String,
    pub created_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = addresses)]
pub struct NewAddress<'a> {
    pub user_id: i32,
    pub full_name: &'a str,
    pub address_line1: &'a str,
    pub city: &'a str,
    pub state: &'a str,
}
