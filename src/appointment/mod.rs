mod requests;
pub mod responses;

use crate::{
    auth::AuthUser,
    database::{assert, get_db_conn},
    models::appointments::{Appointment, NewAppointment, UpdateAppointment},
    protocol::{ApiError, ApiResult},
    DbPool,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::AppointmentItem};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(list)
        .service(create)
        .service(detail)
        .service(full_update)
        .service(partial_update)
        .service(remove);
}

async fn get_own_appointment(
    pool: &web::Data<DbPool>,
    user_id: i32,
    id: i32,
) -> ApiResult<Appointment> {
    use crate::schema::appointments;

    let mut conn = get_db_conn(pool)?;
    web::block(move || {
        appointments::table
            .filter(appointments::id.eq(id))
            .filter(appointments::user_id.eq(user_id))
            .get_result::<Appointment>(&mut conn)
            .optional()
    })
    .await??
    .ok_or_else(|| ApiError::not_found("Not found."))
}

#[get("")]
async fn list(user: AuthUser, pool: web::Data<DbPool>) -> ApiResult<HttpResponse> {
    use crate::schema::appointments;

    let user_id = user.0.id;
    let mut conn = get_db_conn(&pool)?;
    let appos = web::block(move || {
        appointments::table
            .filter(appointments::user_id.eq(user_id))
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

#[post("")]
async fn create(
    user: AuthUser,
    pool: web::Data<DbPool>,
    info: web::Json<CreateAppointmentRequest>,
) -> ApiResult<HttpResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    let user_id = user.0.id;
    let scheduling_id = info
        .appointment_scheduling
        .ok_or_else(|| ApiError::required("appointment_scheduling"))?;
    assert::assert_scheduling_available(&pool, scheduling_id).await?;

    let mut conn = get_db_conn(&pool)?;
    let appo = web::block(move || {
        conn.immediate_transaction::<_, ApiError, _>(|conn| {
            assert::claim_scheduling(conn, scheduling_id)?;

            let now = Utc::now().naive_utc();
            let data = NewAppointment {
                user_id,
                appointment_scheduling_id: scheduling_id,
                comments: info.comments.unwrap_or_default(),
                created: now,
                updated: now,
            };
            let appo = diesel::insert_into(appointments::table)
                .values(data)
                .get_result::<Appointment>(conn)?;

            Ok(appo)
        })
    })
    .await??;
    tracing::info!(
        appointment_id = appo.id,
        scheduling_id,
        user_id,
        "appointment booked"
    );

    Ok(HttpResponse::Created().json(AppointmentItem::from(appo)))
}

#[get("/{id}")]
async fn detail(
    user: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let appo = get_own_appointment(&pool, user.0.id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AppointmentItem::from(appo)))
}

#[put("/{id}")]
async fn full_update(
    user: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    info: web::Json<UpdateAppointmentRequest>,
) -> ApiResult<HttpResponse> {
    let info = info.into_inner();
    if info.appointment_scheduling.is_none() {
        return Err(ApiError::required("appointment_scheduling"));
    }
    update_impl(pool, user.0.id, path.into_inner(), info).await
}

#[patch("/{id}")]
async fn partial_update(
    user: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    info: web::Json<UpdateAppointmentRequest>,
) -> ApiResult<HttpResponse> {
    update_impl(pool, user.0.id, path.into_inner(), info.into_inner()).await
}

/// Moving an appointment to another slot books the new slot under the same
/// guard as creation and reopens the old one.
async fn update_impl(
    pool: web::Data<DbPool>,
    user_id: i32,
    id: i32,
    info: UpdateAppointmentRequest,
) -> ApiResult<HttpResponse> {
    use crate::schema::appointments;

    let current = get_own_appointment(&pool, user_id, id).await?;
    let old_scheduling_id = current.appointment_scheduling_id;
    let moved_to = info
        .appointment_scheduling
        .filter(|scheduling_id| *scheduling_id != old_scheduling_id);
    if let Some(scheduling_id) = moved_to {
        assert::assert_scheduling_available(&pool, scheduling_id).await?;
    }

    let mut conn = get_db_conn(&pool)?;
    let appo = web::block(move || {
        conn.immediate_transaction::<_, ApiError, _>(|conn| {
            if let Some(scheduling_id) = moved_to {
                assert::claim_scheduling(conn, scheduling_id)?;
            }

            let data = UpdateAppointment {
                appointment_scheduling_id: moved_to,
                comments: info.comments,
                updated: Some(Utc::now().naive_utc()),
            };
            let appo = diesel::update(appointments::table.filter(appointments::id.eq(id)))
                .set(&data)
                .get_result::<Appointment>(conn)?;

            if moved_to.is_some() {
                assert::release_scheduling(conn, old_scheduling_id)?;
            }

            Ok(appo)
        })
    })
    .await??;

    if let Some(scheduling_id) = moved_to {
        tracing::info!(
            appointment_id = id,
            from = old_scheduling_id,
            to = scheduling_id,
            "appointment moved"
        );
    }

    Ok(HttpResponse::Ok().json(AppointmentItem::from(appo)))
}

#[delete("/{id}")]
async fn remove(
    user: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    use crate::schema::appointments;

    let appo = get_own_appointment(&pool, user.0.id, path.into_inner()).await?;
    let (id, scheduling_id) = (appo.id, appo.appointment_scheduling_id);

    let mut conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.immediate_transaction::<_, ApiError, _>(|conn| {
            diesel::delete(appointments::table.filter(appointments::id.eq(id))).execute(conn)?;
            assert::release_scheduling(conn, scheduling_id)
        })
    })
    .await??;
    tracing::info!(appointment_id = id, scheduling_id, "appointment cancelled");

    Ok(HttpResponse::NoContent().finish())
}
