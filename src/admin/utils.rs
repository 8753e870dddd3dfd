use anyhow::Context;
use diesel::prelude::*;

use crate::{models::users::UserData, user::utils::create_user, DbPool};

/// Creates the bootstrap superuser unless an account with that email exists.
/// Returns whether a new account was made.
pub fn ensure_superuser(pool: &DbPool, email: &str, password: &str) -> anyhow::Result<bool> {
    use crate::schema::users;

    let mut conn = pool.get().context("DB connection")?;
    let email = crate::utils::normalize_email(email);
    let existing = users::table
        .filter(users::email.eq(&email))
        .get_result::<UserData>(&mut conn)
        .optional()
        .context("DB error")?;
    if existing.is_some() {
        return Ok(false);
    }

    create_user(&mut conn, &email, password, "", true).context("Failed to create superuser")?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn superuser_is_created_once() {
        let pool = test_utils::test_pool();

        assert!(ensure_superuser(&pool, "admin@CLINIC.com", "adminpass").unwrap());
        assert!(!ensure_superuser(&pool, "admin@clinic.com", "adminpass").unwrap());

        use crate::schema::users;
        let mut conn = pool.get().unwrap();
        let admin = users::table
            .filter(users::email.eq("admin@clinic.com"))
            .get_result::<UserData>(&mut conn)
            .unwrap();
        assert!(admin.is_staff);
        assert!(admin.is_superuser);
    }
}
