use serde::Serialize;

use crate::{
    models::{pediatricians::PediatricianData, schedulings::SchedulingData},
    utils::{format_date_str, format_hour_str, format_time_str},
};

#[derive(Serialize)]
pub struct SchedulingItem {
    pub id: i32,
    pub pediatrician: i32,
    pub time_start: String,
    pub time_finish: String,
    pub is_available: bool,
    pub summary: String,
    pub created: String,
    pub updated: String,
}

impl From<(SchedulingData, PediatricianData)> for SchedulingItem {
    fn from((data, pediatrician): (SchedulingData, PediatricianData)) -> Self {
        let summary = format!(
            "{} on {} from {} to {}",
            pediatrician.name,
            format_date_str(&data.time_start),
            format_hour_str(&data.time_start),
            format_hour_str(&data.time_finish),
        );
        Self {
            id: data.id,
            pediatrician: data.pediatrician_id,
            time_start: format_time_str(&data.time_start),
            time_finish: format_time_str(&data.time_finish),
            is_available: data.is_available,
            summary,
            created: format_time_str(&data.created),
            updated: format_time_str(&data.updated),
        }
    }
}
