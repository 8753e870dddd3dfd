use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::{
    config::AppConfig,
    models::users::UserData,
    protocol::ApiError,
    user::utils::get_user_from_token,
    DbPool,
};

/// The user behind the request's bearer token.
pub struct AuthUser(pub UserData);

/// An authenticated user with `is_staff` set.
pub struct StaffUser(pub UserData);

fn bearer_token(req: &HttpRequest) -> Result<String, ApiError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Authentication credentials were not provided.".to_string())
        })?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid authorization header.".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("Token "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization header.".to_string()))?;

    Ok(token.to_string())
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let ttl_secs = req
            .app_data::<web::Data<AppConfig>>()
            .and_then(|config| config.token_ttl_secs);

        Box::pin(async move {
            let token = token?;
            let pool =
                pool.ok_or_else(|| ApiError::Internal("database pool not configured".to_string()))?;
            let user = get_user_from_token(token, &pool, ttl_secs).await?;
            Ok(AuthUser(user))
        })
    }
}

impl FromRequest for StaffUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let user = AuthUser::from_request(req, payload);

        Box::pin(async move {
            let AuthUser(user) = user.await?;
            if !user.is_staff {
                return Err(ApiError::Forbidden(
                    "You do not have permission to perform this action.".to_string(),
                ));
            }
            Ok(StaffUser(user))
        })
    }
}
