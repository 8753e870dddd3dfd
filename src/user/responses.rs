use serde::Serialize;

use crate::models::users::UserData;

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl From<UserData> for UserResponse {
    fn from(data: UserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            name: data.name,
        }
    }
}

#[derive(Serialize)]
pub struct MeResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub is_staff: bool,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}
