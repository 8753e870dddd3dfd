use serde::Serialize;

use crate::{models::appointments::Appointment, utils::format_time_str};

#[derive(Serialize)]
pub struct AppointmentItem {
    pub id: i32,
    pub user: i32,
    pub appointment_scheduling: i32,
    pub comments: String,
    pub created: String,
    pub updated: String,
}

impl From<Appointment> for AppointmentItem {
    fn from(data: Appointment) -> Self {
        Self {
            id: data.id,
            user: data.user_id,
            appointment_scheduling: data.appointment_scheduling_id,
            comments: data.comments,
            created: format_time_str(&data.created),
            updated: format_time_str(&data.updated),
        }
    }
}
