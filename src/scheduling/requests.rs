use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateSchedulingRequest {
    pub pediatrician: Option<i32>,
    pub time_start: Option<String>,
    pub time_finish: Option<String>,
}
