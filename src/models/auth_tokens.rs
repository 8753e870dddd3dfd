use crate::schema::auth_tokens;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Insertable)]
#[diesel(table_name = auth_tokens)]
pub struct AuthTokenData {
    pub key: String,
    pub user_id: i32,
    pub created: NaiveDateTime,
}
