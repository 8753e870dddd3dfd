use serde::Serialize;

use crate::{
    models::{pediatricians::PediatricianData, users::UserData},
    utils::format_time_str,
};

#[derive(Serialize)]
pub struct PediatricianItem {
    pub id: i32,
    pub name: String,
    pub genre: String,
    pub created: String,
    pub updated: String,
}

impl From<PediatricianData> for PediatricianItem {
    fn from(data: PediatricianData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            genre: data.genre,
            created: format_time_str(&data.created),
            updated: format_time_str(&data.updated),
        }
    }
}

#[derive(Serialize)]
pub struct UserItem {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub last_login: Option<String>,
}

impl From<UserData> for UserItem {
    fn from(data: UserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            name: data.name,
            is_active: data.is_active,
            is_staff: data.is_staff,
            is_superuser: data.is_superuser,
            last_login: data.last_login.as_ref().map(format_time_str),
        }
    }
}
