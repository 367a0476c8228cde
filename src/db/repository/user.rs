use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{User, UserRole};

const COLUMNS: &str = "id, email, password_hash, role, doctor_employee_id, created_at";

pub fn insert_user(conn: &Connection, user: &User) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO users (id, email, password_hash, role, doctor_employee_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user.id.to_string(),
            user.email,
            user.password_hash,
            user.role.as_str(),
            user.doctor_employee_id,
            user.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM users WHERE email = ?1"))?;
    let result = stmt.query_row(params![email], row_to_user_row);
    match result {
        Ok(row) => Ok(Some(user_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// Internal row type for User mapping
struct UserRow {
    id: String,
    email: String,
    password_hash: String,
    role: String,
    doctor_employee_id: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

fn row_to_user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        role: row.get(3)?,
        doctor_employee_id: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn user_from_row(row: UserRow) -> Result<User, DatabaseError> {
    Ok(User {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        email: row.email,
        password_hash: row.password_hash,
        role: UserRole::from_str(&row.role)?,
        doctor_employee_id: row.doctor_employee_id,
        created_at: row.created_at,
    })
}
