use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    App,
};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use tempfile::TempDir;

use crate::{
    config::AppConfig,
    database::build_pool,
    models::{
        appointments::{Appointment, NewAppointment},
        pediatricians::{NewPediatrician, PediatricianData, GENRE_MALE},
        schedulings::{NewScheduling, SchedulingData},
        users::UserData,
    },
    user::utils::{create_user, get_or_create_token},
    DbPool,
};

/// A private in-memory database. One connection, so every checkout sees the
/// same data.
pub fn test_pool() -> DbPool {
    build_pool(":memory:", 1).expect("in-memory pool")
}

/// A database file in a fresh temp dir, shared by several connections.
/// Keep the `TempDir` alive for as long as the pool is used.
pub fn file_pool(max_size: u32) -> (TempDir, DbPool) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("appointments.db");
    let pool = build_pool(&path.to_string_lossy(), max_size).expect("file pool");
    (dir, pool)
}

pub fn test_app(
    pool: DbPool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    test_app_with_config(pool, AppConfig::default())
}

pub fn test_app_with_config(
    pool: DbPool,
    config: AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().configure(crate::routes(pool, config))
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub fn sample_user(pool: &DbPool, email: &str, password: &str) -> UserData {
    let mut conn = pool.get().unwrap();
    create_user(&mut conn, email, password, "Test user", false).unwrap()
}

pub fn sample_staff(pool: &DbPool, email: &str, password: &str) -> UserData {
    let mut conn = pool.get().unwrap();
    create_user(&mut conn, email, password, "Staff", true).unwrap()
}

pub fn sample_token(pool: &DbPool, user_id: i32) -> String {
    let mut conn = pool.get().unwrap();
    get_or_create_token(&mut conn, user_id, None).unwrap()
}

/// A user plus a ready bearer token.
pub fn authenticated_user(pool: &DbPool, email: &str) -> (UserData, String) {
    let user = sample_user(pool, email, "testpass");
    let token = sample_token(pool, user.id);
    (user, token)
}

pub fn sample_pediatrician(pool: &DbPool, name: &str) -> PediatricianData {
    use crate::schema::pediatricians;

    let mut conn = pool.get().unwrap();
    let now = Utc::now().naive_utc();
    diesel::insert_into(pediatricians::table)
        .values(NewPediatrician {
            name: name.to_string(),
            genre: GENRE_MALE.to_string(),
            created: now,
            updated: now,
        })
        .get_result(&mut conn)
        .unwrap()
}

/// A one hour slot that ended just now.
pub fn sample_scheduling(pool: &DbPool, pediatrician_id: i32, is_available: bool) -> SchedulingData {
    use crate::schema::appointment_schedulings;

    let mut conn = pool.get().unwrap();
    let now = Utc::now().naive_utc();
    diesel::insert_into(appointment_schedulings::table)
        .values(NewScheduling {
            pediatrician_id,
            time_start: now - Duration::hours(1),
            time_finish: now,
            is_available,
            created: now,
            updated: now,
        })
        .get_result(&mut conn)
        .unwrap()
}

/// Inserts an appointment row directly, bypassing the availability guard.
pub fn sample_appointment(pool: &DbPool, user_id: i32, scheduling_id: i32) -> Appointment {
    use crate::schema::appointments;

    let mut conn = pool.get().unwrap();
    let now = Utc::now().naive_utc();
    diesel::insert_into(appointments::table)
        .values(NewAppointment {
            user_id,
            appointment_scheduling_id: scheduling_id,
            comments: "comments".to_string(),
            created: now,
            updated: now,
        })
        .get_result(&mut conn)
        .unwrap()
}

pub fn get_scheduling(pool: &DbPool, id: i32) -> SchedulingData {
    use crate::schema::appointment_schedulings;

    let mut conn = pool.get().unwrap();
    appointment_schedulings::table
        .filter(appointment_schedulings::id.eq(id))
        .get_result(&mut conn)
        .unwrap()
}

pub fn get_appointment(pool: &DbPool, id: i32) -> Option<Appointment> {
    use crate::schema::appointments;

    let mut conn = pool.get().unwrap();
    appointments::table
        .filter(appointments::id.eq(id))
        .get_result(&mut conn)
        .optional()
        .unwrap()
}
