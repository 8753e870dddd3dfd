mod requests;
mod responses;
pub mod utils;

use crate::{
    appointment::responses::AppointmentItem,
    auth::StaffUser,
    database::get_db_conn,
    models::{
        appointments::Appointment,
        pediatricians::{NewPediatrician, PediatricianData, GENRE_MALE},
        users::UserData,
    },
    protocol::{ApiError, ApiResult, SimpleResponse},
    scheduling::{load_schedulings, responses::SchedulingItem},
    DbPool,
};
use actix_web::{delete, get, post, web, HttpResponse};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add_pediatrician)
        .service(search_pediatrician)
        .service(delete_pediatrician)
        .service(search_scheduling)
        .service(delete_scheduling)
        .service(search_appointment)
        .service(search_user)
        .service(ban_user);
}

#[post("/pediatrician")]
async fn add_pediatrician(
    _staff: StaffUser,
    pool: web::Data<DbPool>,
    info: web::Json<AddPediatricianRequest>,
) -> ApiResult<HttpResponse> {
    use crate::schema::pediatricians;

    let info = info.into_inner();
    let genre = info.genre.unwrap_or_else(|| GENRE_MALE.to_string());
    crate::utils::assert_genre_str(&genre)?;

    let mut conn = get_db_conn(&pool)?;
    let pediatrician = web::block(move || {
        let now = Utc::now().naive_utc();
        let data = NewPediatrician {
            name: info.name.trim().to_string(),
            genre,
            created: now,
            updated: now,
        };
        diesel::insert_into(pediatricians::table)
            .values(data)
            .get_result::<PediatricianData>(&mut conn)
    })
    .await??;
    tracing::info!(pediatrician_id = pediatrician.id, "pediatrician added");

    Ok(HttpResponse::Created().json(PediatricianItem::from(pediatrician)))
}

#[get("/pediatrician")]
async fn search_pediatrician(
    _staff: StaffUser,
    pool: web::Data<DbPool>,
) -> ApiResult<HttpResponse> {
    use crate::schema::pediatricians;

    let mut conn = get_db_conn(&pool)?;
    let peds = web::block(move || {
        pediatricians::table
            .order((pediatricians::created.desc(), pediatricians::id.desc()))
            .get_results::<PediatricianData>(&mut conn)
    })
    .await??;

    let peds = peds
        .into_iter()
        .map(PediatricianItem::from)
        .collect::<Vec<_>>();

    Ok(HttpResponse::Ok().json(peds))
}

#[delete("/pediatrician/{id}")]
async fn delete_pediatrician(
    _staff: StaffUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    use crate::schema::pediatricians;

    let id = path.into_inner();
    let mut conn = get_db_conn(&pool)?;
    let deleted = web::block(move || {
        diesel::delete(pediatricians::table.filter(pediatricians::id.eq(id))).execute(&mut conn)
    })
    .await??;
    if deleted == 0 {
        return Err(ApiError::not_found("Not found."));
    }
    tracing::info!(pediatrician_id = id, "pediatrician deleted");

    Ok(HttpResponse::NoContent().finish())
}

#[get("/appointmentscheduling")]
async fn search_scheduling(
    _staff: StaffUser,
    pool: web::Data<DbPool>,
) -> ApiResult<HttpResponse> {
    let mut conn = get_db_conn(&pool)?;
    let schedulings = web::block(move || load_schedulings(&mut conn, false)).await??;

    let schedulings = schedulings
        .into_iter()
        .map(SchedulingItem::from)
        .collect::<Vec<_>>();

    Ok(HttpResponse::Ok().json(schedulings))
}

#[delete("/appointmentscheduling/{id}")]
async fn delete_scheduling(
    _staff: StaffUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    use crate::schema::appointment_schedulings;

    let id = path.into_inner();
    let mut conn = get_db_conn(&pool)?;
    let deleted = web::block(move || {
        diesel::delete(appointment_schedulings::table.filter(appointment_schedulings::id.eq(id)))
            .execute(&mut conn)
    })
    .await??;
    if deleted == 0 {
        return Err(ApiError::not_found("Not found."));
    }
    tracing::info!(scheduling_id = id, "appointment scheduling deleted");

    Ok(HttpResponse::NoContent().finish())
}

#[get("/appointment")]
async fn search_appointment(
    _staff: StaffUser,
    pool: web::Data<DbPool>,
) -> ApiResult<HttpResponse> {
    use crate::schema::appointments;

    let mut conn = get_db_conn(&pool)?;
    let appos = web::block(move || {
        appointments::table
            .order((appointments::created.desc(), appointments::id.desc()))
            .get_results::<Appointment>(&mut conn)
    })
    .await??;

    let appos = appos
        .into_iter()
        .map(AppointmentItem::from)
        .collect::<Vec<_>>();

    Ok(HttpResponse::Ok().json(appos))
}

#[get("/user")]
async fn search_user(_staff: StaffUser, pool: web::Data<DbPool>) -> ApiResult<HttpResponse> {
    use crate::schema::users;

    let mut conn = get_db_conn(&pool)?;
    let users = web::block(move || {
        users::table
            .order((users::created.desc(), users::id.desc()))
            .get_results::<UserData>(&mut conn)
    })
    .await??;

    let users = users.into_iter().map(UserItem::from).collect::<Vec<_>>();

    Ok(HttpResponse::Ok().json(users))
}

/// Deactivates the account and revokes its token.
#[post("/user/{id}/ban")]
async fn ban_user(
    _staff: StaffUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    use crate::schema::{auth_tokens, users};

    let id = path.into_inner();
    let mut conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.immediate_transaction::<_, ApiError, _>(|conn| {
            let updated = diesel::update(users::table.filter(users::id.eq(id)))
                .set(users::is_active.eq(false))
                .execute(conn)?;
            if updated == 0 {
                return Err(ApiError::not_found("Not found."));
            }
            diesel::delete(auth_tokens::table.filter(auth_tokens::user_id.eq(id)))
                .execute(conn)?;
            Ok(())
        })
    })
    .await??;
    tracing::info!(user_id = id, "user banned");

    Ok(HttpResponse::Ok().json(SimpleResponse::ok()))
}
