use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{DayAvailability, Doctor, Gender};

const COLUMNS: &str = "id, name, specialization, mobile, employee_id, gender,
     avatar_url, availability, queries_assigned, created_at, updated_at";

pub fn insert_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (id, name, specialization, mobile, employee_id, gender,
         avatar_url, availability, queries_assigned, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            doctor.id.to_string(),
            doctor.name,
            doctor.specialization,
            doctor.mobile,
            doctor.employee_id,
            doctor.gender.as_str(),
            doctor.avatar_url,
            serde_json::to_string(&doctor.availability)?,
            serde_json::to_string(&doctor.queries_assigned)?,
            doctor.created_at,
            doctor.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_doctor(conn: &Connection, id: &Uuid) -> Result<Option<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM doctors WHERE id = ?1"))?;
    let result = stmt.query_row(params![id.to_string()], row_to_doctor_row);
    match result {
        Ok(row) => Ok(Some(doctor_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_doctor_by_employee_id(
    conn: &Connection,
    employee_id: &str,
) -> Result<Option<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM doctors WHERE employee_id = ?1"
    ))?;
    let result = stmt.query_row(params![employee_id], row_to_doctor_row);
    match result {
        Ok(row) => Ok(Some(doctor_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write back every mutable column of an existing doctor.
pub fn update_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE doctors SET name = ?2, specialization = ?3, mobile = ?4, employee_id = ?5,
         gender = ?6, avatar_url = ?7, availability = ?8, queries_assigned = ?9,
         updated_at = ?10
         WHERE id = ?1",
        params![
            doctor.id.to_string(),
            doctor.name,
            doctor.specialization,
            doctor.mobile,
            doctor.employee_id,
            doctor.gender.as_str(),
            doctor.avatar_url,
            serde_json::to_string(&doctor.availability)?,
            serde_json::to_string(&doctor.queries_assigned)?,
            doctor.updated_at,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Doctor".into(),
            id: doctor.id.to_string(),
        });
    }
    Ok(())
}

pub fn delete_doctor(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let deleted = conn.execute("DELETE FROM doctors WHERE id = ?1", params![id.to_string()])?;
    Ok(deleted > 0)
}

/// List doctors, newest first. `limit < 0` means no limit.
pub fn list_doctors(
    conn: &Connection,
    limit: i64,
    offset: i64,
) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM doctors ORDER BY created_at DESC, id LIMIT {limit} OFFSET {offset}"
    ))?;
    let rows = stmt.query_map([], row_to_doctor_row)?;

    let mut doctors = Vec::new();
    for row in rows {
        doctors.push(doctor_from_row(row?)?);
    }
    Ok(doctors)
}

pub fn count_doctors(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM doctors", [], |row| row.get(0))?;
    Ok(count)
}

// Internal row type for Doctor mapping
struct DoctorRow {
    id: String,
    name: String,
    specialization: String,
    mobile: String,
    employee_id: String,
    gender: String,
    avatar_url: Option<String>,
    availability: String,
    queries_assigned: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

fn row_to_doctor_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DoctorRow> {
    Ok(DoctorRow {
        id: row.get(0)?,
        name: row.get(1)?,
        specialization: row.get(2)?,
        mobile: row.get(3)?,
        employee_id: row.get(4)?,
        gender: row.get(5)?,
        avatar_url: row.get(6)?,
        availability: row.get(7)?,
        queries_assigned: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn doctor_from_row(row: DoctorRow) -> Result<Doctor, DatabaseError> {
    let availability: Vec<DayAvailability> = serde_json::from_str(&row.availability)?;
    let queries_assigned: Vec<Uuid> = serde_json::from_str(&row.queries_assigned)?;
    Ok(Doctor {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        name: row.name,
        specialization: row.specialization,
        mobile: row.mobile,
        employee_id: row.employee_id,
        gender: Gender::from_str(&row.gender)?,
        avatar_url: row.avatar_url,
        availability,
        queries_assigned,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
