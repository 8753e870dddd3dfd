mod requests;
mod responses;
pub mod utils;

use crate::{
    auth::AuthUser,
    config::AppConfig,
    database::get_db_conn,
    models::users::UserData,
    protocol::{ApiError, ApiResult, SimpleResponse},
    DbPool,
};
use actix_web::{get, post, web, HttpResponse};
use diesel::prelude::*;

use self::{
    requests::*,
    responses::*,
    utils::{create_user, get_or_create_token, verify_password, MIN_PASSWORD_LEN},
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(create)
        .service(token)
        .service(logout)
        .service(me);
}

#[post("/create")]
async fn create(
    pool: web::Data<DbPool>,
    info: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let info = info.into_inner();
    let email = info
        .email
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(|| ApiError::required("email"))?;
    let password = info
        .password
        .filter(|password| !password.is_empty())
        .ok_or_else(|| ApiError::required("password"))?;
    let name = info
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::required("name"))?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "password: Ensure this field has at least {} characters.",
            MIN_PASSWORD_LEN
        )));
    }

    let mut conn = get_db_conn(&pool)?;
    let user = web::block(move || create_user(&mut conn, &email, &password, &name, false)).await??;
    tracing::info!(user_id = user.id, "user created");

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

#[post("/token")]
async fn token(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    info: web::Json<TokenRequest>,
) -> ApiResult<HttpResponse> {
    use crate::schema::users;

    let info = info.into_inner();
    let email = info
        .email
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(|| ApiError::required("email"))?;
    let password = info
        .password
        .filter(|password| !password.is_empty())
        .ok_or_else(|| ApiError::required("password"))?;
    let email = crate::utils::normalize_email(&email);
    let ttl_secs = config.token_ttl_secs;

    let mut conn = get_db_conn(&pool)?;
    let (user_id, token) = web::block(move || -> ApiResult<(i32, String)> {
        let user = users::table
            .filter(users::email.eq(&email))
            .get_result::<UserData>(&mut conn)
            .optional()?;

        let user = match user {
            Some(user) if user.is_active && verify_password(&password, &user.password) => user,
            _ => {
                return Err(ApiError::bad_request(
                    "Unable to authenticate with provided credentials",
                ))
            }
        };

        let token = get_or_create_token(&mut conn, user.id, ttl_secs)?;
        Ok((user.id, token))
    })
    .await??;
    tracing::info!(user_id, "token issued");

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

#[post("/logout")]
async fn logout(user: AuthUser, pool: web::Data<DbPool>) -> ApiResult<HttpResponse> {
    use crate::schema::auth_tokens;

    let user_id = user.0.id;
    let mut conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::delete(auth_tokens::table.filter(auth_tokens::user_id.eq(user_id)))
            .execute(&mut conn)
    })
    .await??;

    Ok(HttpResponse::Ok().json(SimpleResponse::ok()))
}

#[get("/me")]
async fn me(user: AuthUser) -> HttpResponse {
    let user = user.0;
    HttpResponse::Ok().json(MeResponse {
        id: user.id,
        email: user.email,
        name: user.name,
        is_staff: user.is_staff,
    })
}
