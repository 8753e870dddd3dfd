use crate::schema::appointment_schedulings;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Debug, Clone)]
pub struct SchedulingData {
    pub id: i32,
    pub pediatrician_id: i32,
    pub time_start: NaiveDateTime,
    pub time_finish: NaiveDateTime,
    pub is_available: bool,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = appointment_schedulings)]
pub struct NewScheduling {
    pub pediatrician_id: i32,
    pub time_start: NaiveDateTime,
    pub time_finish: NaiveDateTime,
    pub is_available: bool,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}
