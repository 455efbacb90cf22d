use crate::data::models::schema::*;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = admins)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Admin {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = admins)]
pub struct NewAdmin<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug)]
#[diesel(table_name = admin_logs)]
#[diesel(belongs_to(Admin, foreign_key = admin_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct AdminLog {
    pub id: i32,
    pub admin_id: i32,
    pub action: String,
    pub description: Option<String>,
    pub created_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = admin_logs)]
pub struct NewAdminLog<'a> {
    pub admin_id: i32,
    pub action: &'a str,
    pub description: Option<&'a str>,
}
