use crate::schema::pediatricians;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Debug, Clone)]
pub struct PediatricianData {
    pub id: i32,
    pub name: String,
    pub genre: String,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = pediatricians)]
pub struct NewPediatrician {
    pub name: String,
    pub genre: String,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

pub const GENRE_MALE: &str = "M";
pub const GENRE_FEMALE: &str = "F";
