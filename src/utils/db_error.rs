/// Unique index backing email uniqueness, see `migrations/`.
pub const USERS_EMAIL_CONSTRAINT: &str = "users_email_lower_key";

pub fn is_unique_violation_on_email(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(USERS_EMAIL_CONSTRAINT))
}
