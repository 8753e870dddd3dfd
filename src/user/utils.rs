use actix_web::web;
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use chrono::Utc;
use diesel::{
    prelude::*,
    result::{DatabaseErrorKind, Error::DatabaseError},
};
use rand::RngCore;

use crate::{
    database::get_db_conn,
    models::{
        auth_tokens::AuthTokenData,
        users::{NewUser, UserData},
    },
    protocol::{ApiError, ApiResult},
    DbPool,
};

pub const MIN_PASSWORD_LEN: usize = 5;

const DUPLICATE_EMAIL: &str = "email: user with this email already exists.";

pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// 20 random bytes, hex encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn create_user(
    conn: &mut SqliteConnection,
    email: &str,
    password: &str,
    name: &str,
    superuser: bool,
) -> ApiResult<UserData> {
    use crate::schema::users;

    let email = crate::utils::normalize_email(email);
    if email.is_empty() {
        return Err(ApiError::bad_request("Users must have an email address"));
    }
    match email.rsplit_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => return Err(ApiError::bad_request("email: Enter a valid email address.")),
    }

    let password = hash_password(password)?;
    conn.immediate_transaction::<_, ApiError, _>(|conn| {
        let res = users::table
            .filter(users::email.eq(&email))
            .count()
            .get_result::<i64>(conn)?;
        if res > 0 {
            return Err(ApiError::bad_request(DUPLICATE_EMAIL));
        }

        let data = NewUser {
            email,
            name: name.to_string(),
            password,
            is_staff: superuser,
            is_superuser: superuser,
            created: Utc::now().naive_utc(),
        };
        let user = diesel::insert_into(users::table)
            .values(data)
            .get_result::<UserData>(conn)
            .map_err(|e| match e {
                DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    ApiError::bad_request(DUPLICATE_EMAIL)
                }
                e => e.into(),
            })?;

        Ok(user)
    })
}

/// Returns the user's current token, issuing a fresh one when there is none
/// or the old one has outlived `ttl_secs`.
pub fn get_or_create_token(
    conn: &mut SqliteConnection,
    user_id: i32,
    ttl_secs: Option<i64>,
) -> ApiResult<String> {
    use crate::schema::{auth_tokens, users};

    conn.immediate_transaction::<_, ApiError, _>(|conn| {
        let now = Utc::now().naive_utc();
        let existing = auth_tokens::table
            .filter(auth_tokens::user_id.eq(user_id))
            .get_result::<AuthTokenData>(conn)
            .optional()?;

        let token = match existing {
            Some(data) if !is_expired(&data, ttl_secs) => data.key,
            stale => {
                if stale.is_some() {
                    diesel::delete(auth_tokens::table.filter(auth_tokens::user_id.eq(user_id)))
                        .execute(conn)?;
                }
                let data = AuthTokenData {
                    key: generate_token(),
                    user_id,
                    created: now,
                };
                diesel::insert_into(auth_tokens::table)
                    .values(&data)
                    .execute(conn)?;
                data.key
            }
        };

        diesel::update(users::table.filter(users::id.eq(user_id)))
            .set(users::last_login.eq(Some(now)))
            .execute(conn)?;

        Ok(token)
    })
}

fn is_expired(data: &AuthTokenData, ttl_secs: Option<i64>) -> bool {
    match ttl_secs {
        Some(ttl) => {
            let age = Utc::now().naive_utc().signed_duration_since(data.created);
            age.num_seconds() > ttl
        }
        None => false,
    }
}

pub async fn get_user_from_token(
    token: String,
    pool: &web::Data<DbPool>,
    ttl_secs: Option<i64>,
) -> ApiResult<UserData> {
    use crate::schema::{auth_tokens, users};

    let mut conn = get_db_conn(pool)?;
    let data = web::block(move || {
        auth_tokens::table
            .inner_join(users::table)
            .filter(auth_tokens::key.eq(token))
            .get_result::<(AuthTokenData, UserData)>(&mut conn)
            .optional()
    })
    .await??;

    match data {
        Some((token, _)) if is_expired(&token, ttl_secs) => {
            Err(ApiError::Unauthorized("Token has expired.".to_string()))
        }
        Some((_, user)) if !user.is_active => Err(ApiError::Unauthorized(
            "User inactive or deleted.".to_string(),
        )),
        Some((_, user)) => Ok(user),
        None => Err(ApiError::Unauthorized("Invalid token.".to_string())),
    }
}
