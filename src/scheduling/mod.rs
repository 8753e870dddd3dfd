mod requests;
pub mod responses;

use crate::{
    auth::AuthUser,
    database::{assert, get_db_conn},
    models::{
        pediatricians::PediatricianData,
        schedulings::{NewScheduling, SchedulingData},
    },
    protocol::{ApiError, ApiResult},
    DbPool,
};
use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::SchedulingItem};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(list).service(create).service(detail);
}

/// Newest first. `only_available` hides slots that are already booked.
pub fn load_schedulings(
    conn: &mut SqliteConnection,
    only_available: bool,
) -> QueryResult<Vec<(SchedulingData, PediatricianData)>> {
    use crate::schema::{appointment_schedulings, pediatricians};

    let mut query = appointment_schedulings::table
        .inner_join(pediatricians::table)
        .order((
            appointment_schedulings::created.desc(),
            appointment_schedulings::id.desc(),
        ))
        .into_boxed();
    if only_available {
        query = query.filter(appointment_schedulings::is_available.eq(true));
    }
    query.get_results::<(SchedulingData, PediatricianData)>(conn)
}

#[get("")]
async fn list(_user: AuthUser, pool: web::Data<DbPool>) -> ApiResult<HttpResponse> {
    let mut conn = get_db_conn(&pool)?;
    let schedulings = web::block(move || load_schedulings(&mut conn, true)).await??;

    let schedulings = schedulings
        .into_iter()
        .map(SchedulingItem::from)
        .collect::<Vec<_>>();

    Ok(HttpResponse::Ok().json(schedulings))
}

#[get("/{id}")]
async fn detail(
    _user: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    use crate::schema::{appointment_schedulings, pediatricians};

    let id = path.into_inner();
    let mut conn = get_db_conn(&pool)?;
    let scheduling = web::block(move || {
        appointment_schedulings::table
            .inner_join(pediatricians::table)
            .filter(appointment_schedulings::id.eq(id))
            .filter(appointment_schedulings::is_available.eq(true))
            .get_result::<(SchedulingData, PediatricianData)>(&mut conn)
            .optional()
    })
    .await??
    .ok_or_else(|| ApiError::not_found("Not found."))?;

    Ok(HttpResponse::Ok().json(SchedulingItem::from(scheduling)))
}

#[post("")]
async fn create(
    _user: AuthUser,
    pool: web::Data<DbPool>,
    info: web::Json<CreateSchedulingRequest>,
) -> ApiResult<HttpResponse> {
    use crate::schema::{appointment_schedulings, pediatricians};

    let info = info.into_inner();
    let pediatrician_id = info
        .pediatrician
        .ok_or_else(|| ApiError::required("pediatrician"))?;
    let time_start = crate::utils::parse_required_time("time_start", info.time_start)?;
    let time_finish = crate::utils::parse_required_time("time_finish", info.time_finish)?;
    if time_start >= time_finish {
        return Err(ApiError::bad_request(
            "time_finish: Must be later than time_start.",
        ));
    }
    assert::assert_pediatrician(&pool, pediatrician_id).await?;

    let mut conn = get_db_conn(&pool)?;
    let scheduling = web::block(move || {
        conn.immediate_transaction::<_, ApiError, _>(|conn| {
            let now = Utc::now().naive_utc();
            let data = NewScheduling {
                pediatrician_id,
                time_start,
                time_finish,
                is_available: true,
                created: now,
                updated: now,
            };
            let scheduling = diesel::insert_into(appointment_schedulings::table)
                .values(data)
                .get_result::<SchedulingData>(conn)?;
            let pediatrician = pediatricians::table
                .filter(pediatricians::id.eq(pediatrician_id))
                .get_result::<PediatricianData>(conn)?;

            Ok((scheduling, pediatrician))
        })
    })
    .await??;
    tracing::info!(
        scheduling_id = scheduling.0.id,
        pediatrician_id,
        "appointment scheduling created"
    );

    Ok(HttpResponse::Created().json(SchedulingItem::from(scheduling)))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{self, bearer};
    use actix_web::{http::StatusCode, test};
    use chrono::{Duration, SecondsFormat, Utc};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn list_requires_auth() {
        let pool = test_utils::test_pool();
        let app = test::init_service(test_utils::test_app(pool)).await;

        let req = test::TestRequest::get()
            .uri("/appointmentscheduling")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn list_returns_available_slots_newest_first() {
        let pool = test_utils::test_pool();
        let (_, token) = test_utils::authenticated_user(&pool, "alfonso@test.com");
        let pediatrician = test_utils::sample_pediatrician(&pool, "Edgar Vazquez");
        let first = test_utils::sample_scheduling(&pool, pediatrician.id, true);
        let second = test_utils::sample_scheduling(&pool, pediatrician.id, true);
        let app = test::init_service(test_utils::test_app(pool)).await;

        let req = test::TestRequest::get()
            .uri("/appointmentscheduling")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![second.id as i64, first.id as i64]);
        assert_eq!(body[0]["pediatrician"], pediatrician.id);
        assert!(body[0]["summary"]
            .as_str()
            .unwrap()
            .starts_with("Edgar Vazquez on "));
    }

    #[actix_web::test]
    async fn list_never_contains_unavailable_slots() {
        let pool = test_utils::test_pool();
        let (_, token) = test_utils::authenticated_user(&pool, "alfonso@test.com");
        let pediatrician = test_utils::sample_pediatrician(&pool, "Edgar Vazquez");
        let open = test_utils::sample_scheduling(&pool, pediatrician.id, true);
        let taken = test_utils::sample_scheduling(&pool, pediatrician.id, false);
        let app = test::init_service(test_utils::test_app(pool)).await;

        let req = test::TestRequest::get()
            .uri("/appointmentscheduling")
            .insert_header(bearer(&token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], open.id);
        assert!(items.iter().all(|item| item["is_available"] == true));

        let req = test::TestRequest::get()
            .uri(&format!("/appointmentscheduling/{}", taken.id))
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn create_basic_scheduling() {
        let pool = test_utils::test_pool();
        let (_, token) = test_utils::authenticated_user(&pool, "alfonso@test.com");
        let pediatrician = test_utils::sample_pediatrician(&pool, "Edgar Vazquez");
        let app = test::init_service(test_utils::test_app(pool)).await;

        let now = Utc::now();
        let req = test::TestRequest::post()
            .uri("/appointmentscheduling")
            .insert_header(bearer(&token))
            .set_json(json!({
                "pediatrician": pediatrician.id,
                "time_start": (now - Duration::hours(1)).to_rfc3339_opts(SecondsFormat::Secs, true),
                "time_finish": now.to_rfc3339_opts(SecondsFormat::Secs, true),
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["pediatrician"], pediatrician.id);
        assert_eq!(body["is_available"], true);
    }

    #[actix_web::test]
    async fn create_bad_request_scheduling() {
        let pool = test_utils::test_pool();
        let (_, token) = test_utils::authenticated_user(&pool, "alfonso@test.com");
        let pediatrician = test_utils::sample_pediatrician(&pool, "Edgar Vazquez");
        let app = test::init_service(test_utils::test_app(pool)).await;

        for payload in [
            json!({"pediatrician": "", "time_start": "", "time_finish": ""}),
            json!({"pediatrician": pediatrician.id, "time_start": "", "time_finish": ""}),
            json!({}),
            json!({
                "pediatrician": pediatrician.id + 100,
                "time_start": "2024-03-01T09:00:00Z",
                "time_finish": "2024-03-01T10:00:00Z",
            }),
            json!({
                "pediatrician": pediatrician.id,
                "time_start": "2024-03-01T10:00:00Z",
                "time_finish": "2024-03-01T09:00:00Z",
            }),
        ] {
            let req = test::TestRequest::post()
                .uri("/appointmentscheduling")
                .insert_header(bearer(&token))
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }
}
