use actix_web::web;
use diesel::prelude::*;

use crate::{
    database::get_db_conn,
    models::schedulings::SchedulingData,
    protocol::{ApiError, ApiResult},
    DbPool,
};

pub const SCHEDULING_NOT_AVAILABLE: &str = "This appointment scheduling is not available";

fn invalid_pk(field: &str, id: i32) -> ApiError {
    ApiError::bad_request(format!(
        "{}: Invalid pk \"{}\" - object does not exist.",
        field, id
    ))
}

pub async fn assert_pediatrician(pool: &web::Data<DbPool>, id: i32) -> ApiResult<()> {
    use crate::schema::pediatricians;

    let mut conn = get_db_conn(pool)?;
    let res = web::block(move || {
        pediatricians::table
            .filter(pediatricians::id.eq(id))
            .count()
            .get_result::<i64>(&mut conn)
    })
    .await??;

    if res == 0 {
        return Err(invalid_pk("pediatrician", id));
    }

    Ok(())
}

pub async fn assert_scheduling(pool: &web::Data<DbPool>, id: i32) -> ApiResult<SchedulingData> {
    use crate::schema::appointment_schedulings;

    let mut conn = get_db_conn(pool)?;
    let res = web::block(move || {
        appointment_schedulings::table
            .filter(appointment_schedulings::id.eq(id))
            .get_result::<SchedulingData>(&mut conn)
            .optional()
    })
    .await??;

    res.ok_or_else(|| invalid_pk("appointment_scheduling", id))
}

/// Validation-time check that the slot exists and is still open. The booking
/// itself re-checks under the write, see `claim_scheduling`.
pub async fn assert_scheduling_available(
    pool: &web::Data<DbPool>,
    id: i32,
) -> ApiResult<SchedulingData> {
    let scheduling = assert_scheduling(pool, id).await?;
    if !scheduling.is_available {
        return Err(ApiError::bad_request(SCHEDULING_NOT_AVAILABLE));
    }
    Ok(scheduling)
}

/// Flips a slot to unavailable only if it is still available. Zero rows
/// touched means someone else got there first.
pub fn claim_scheduling(conn: &mut SqliteConnection, id: i32) -> ApiResult<()> {
    use crate::schema::appointment_schedulings;

    let now = chrono::Utc::now().naive_utc();
    let updated = diesel::update(
        appointment_schedulings::table
            .filter(appointment_schedulings::id.eq(id))
            .filter(appointment_schedulings::is_available.eq(true)),
    )
    .set((
        appointment_schedulings::is_available.eq(false),
        appointment_schedulings::updated.eq(now),
    ))
    .execute(conn)?;

    if updated != 1 {
        return Err(ApiError::bad_request(SCHEDULING_NOT_AVAILABLE));
    }
    Ok(())
}

/// Reopens a slot once no appointment references it anymore.
pub fn release_scheduling(conn: &mut SqliteConnection, id: i32) -> ApiResult<()> {
    use crate::schema::{appointment_schedulings, appointments};

    let remaining = appointments::table
        .filter(appointments::appointment_scheduling_id.eq(id))
        .count()
        .get_result::<i64>(conn)?;
    if remaining > 0 {
        return Ok(());
    }

    let now = chrono::Utc::now().naive_utc();
    diesel::update(appointment_schedulings::table.filter(appointment_schedulings::id.eq(id)))
        .set((
            appointment_schedulings::is_available.eq(true),
            appointment_schedulings::updated.eq(now),
        ))
        .execute(conn)?;
    Ok(())
}
