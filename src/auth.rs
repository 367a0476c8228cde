//! Back-office logins — credential storage, verification, and the
//! idempotent admin bootstrap run once at startup.

use chrono::Utc;
use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::Pbkdf2;
use rusqlite::Connection;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{self, DatabaseError};
use crate::models::{CreateUser, User, UserRole};

const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("a user with email {0} already exists")]
    DuplicateEmail(String),

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error(transparent)]
    Db(#[from] DatabaseError),
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt_bytes: [u8; 16] = rand::random();
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hash(e.to_string()))?;
    let hash = Pbkdf2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok()
}

/// Create a back-office login. Admin-only at the API layer.
pub fn register_user(conn: &Connection, input: &CreateUser) -> Result<User, AuthError> {
    if input.email.trim().is_empty() || !input.email.contains('@') {
        return Err(AuthError::Validation("A valid email is required".into()));
    }
    if input.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AuthError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }
    if db::get_user_by_email(conn, &input.email)?.is_some() {
        return Err(AuthError::DuplicateEmail(input.email.clone()));
    }

    let user = User {
        id: Uuid::new_v4(),
        email: input.email.clone(),
        password_hash: hash_password(&input.password)?,
        role: input.role,
        doctor_employee_id: input.doctor_employee_id.clone(),
        created_at: Utc::now(),
    };
    db::insert_user(conn, &user)?;
    tracing::info!(user = %user.id, role = user.role.as_str(), "user registered");
    Ok(user)
}

/// Verify a login attempt. A wrong email and a wrong password are
/// indistinguishable to the caller.
pub fn login(conn: &Connection, email: &str, password: &str) -> Result<User, AuthError> {
    let user = db::get_user_by_email(conn, email)?.ok_or(AuthError::InvalidCredentials)?;
    if !verify_password(password, &user.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(user)
}

/// Check-then-create the bootstrap admin. Returns whether a user was
/// created; calling again is a no-op.
pub fn seed_admin(conn: &Connection, email: &str, password: &str) -> Result<bool, AuthError> {
    if db::get_user_by_email(conn, email)?.is_some() {
        return Ok(false);
    }

    let admin = User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: hash_password(password)?,
        role: UserRole::Admin,
        doctor_employee_id: None,
        created_at: Utc::now(),
    };
    db::insert_user(conn, &admin)?;
    tracing::info!(email, "bootstrap admin user created");
    Ok(true)
}
