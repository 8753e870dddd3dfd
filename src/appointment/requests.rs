use serde::Deserialize;

/// The owner always comes from the token; a `user` key in the body is ignored.
#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    pub appointment_scheduling: Option<i32>,
    pub comments: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateAppointmentRequest {
    pub appointment_scheduling: Option<i32>,
    pub comments: Option<String>,
}
