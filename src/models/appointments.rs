use crate::schema::appointments;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Debug, Clone)]
pub struct Appointment {
    pub id: i32,
    pub user_id: i32,
    pub appointment_scheduling_id: i32,
    pub comments: String,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = appointments)]
pub struct NewAppointment {
    pub user_id: i32,
    pub appointment_scheduling_id: i32,
    pub comments: String,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = appointments)]
pub struct UpdateAppointment {
    pub appointment_scheduling_id: Option<i32>,
    pub comments: Option<String>,
    pub updated: Option<NaiveDateTime>,
}
