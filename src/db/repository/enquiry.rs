use std::str::FromStr;

use rusqlite::{params, params_from_iter, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Enquiry, EnquiryStatus, Gender, ServiceCategory};

const COLUMNS: &str = "id, patient_name, patient_age, patient_mob, patient_gender,
     message, service, status, assignee, created_at, updated_at";

pub fn insert_enquiry(conn: &Connection, enquiry: &Enquiry) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO enquiries (id, patient_name, patient_age, patient_mob, patient_gender,
         message, service, status, assignee, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            enquiry.id.to_string(),
            enquiry.patient_name,
            enquiry.patient_age,
            enquiry.patient_mob,
            enquiry.patient_gender.map(|g| g.as_str()),
            enquiry.message,
            enquiry.service.as_str(),
            enquiry.status.as_str(),
            enquiry.assignee.map(|id| id.to_string()),
            enquiry.created_at,
            enquiry.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_enquiry(conn: &Connection, id: &Uuid) -> Result<Option<Enquiry>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM enquiries WHERE id = ?1"))?;

    let result = stmt.query_row(params![id.to_string()], row_to_enquiry_row);
    match result {
        Ok(row) => Ok(Some(enquiry_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write back every mutable column of an existing enquiry.
pub fn update_enquiry(conn: &Connection, enquiry: &Enquiry) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE enquiries SET patient_name = ?2, patient_age = ?3, patient_mob = ?4,
         patient_gender = ?5, message = ?6, service = ?7, status = ?8, assignee = ?9,
         updated_at = ?10
         WHERE id = ?1",
        params![
            enquiry.id.to_string(),
            enquiry.patient_name,
            enquiry.patient_age,
            enquiry.patient_mob,
            enquiry.patient_gender.map(|g| g.as_str()),
            enquiry.message,
            enquiry.service.as_str(),
            enquiry.status.as_str(),
            enquiry.assignee.map(|id| id.to_string()),
            enquiry.updated_at,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Enquiry".into(),
            id: enquiry.id.to_string(),
        });
    }
    Ok(())
}

/// Returns whether a row was actually deleted.
pub fn delete_enquiry(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM enquiries WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(deleted > 0)
}

/// List matching enquiries, newest first. `limit < 0` means no limit
/// (SQLite's convention), used by the export path.
pub fn list_enquiries(
    conn: &Connection,
    status: Option<EnquiryStatus>,
    assignee: Option<&Uuid>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Enquiry>, DatabaseError> {
    let (where_clause, filter_params) = filter_clause(status, assignee);
    let sql = format!(
        "SELECT {COLUMNS} FROM enquiries {where_clause}
         ORDER BY created_at DESC, id LIMIT {limit} OFFSET {offset}"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(filter_params.iter()), row_to_enquiry_row)?;

    let mut enquiries = Vec::new();
    for row in rows {
        enquiries.push(enquiry_from_row(row?)?);
    }
    Ok(enquiries)
}

pub fn count_enquiries(
    conn: &Connection,
    status: Option<EnquiryStatus>,
    assignee: Option<&Uuid>,
) -> Result<i64, DatabaseError> {
    let (where_clause, filter_params) = filter_clause(status, assignee);
    let sql = format!("SELECT COUNT(*) FROM enquiries {where_clause}");
    let count = conn.query_row(&sql, params_from_iter(filter_params.iter()), |row| {
        row.get(0)
    })?;
    Ok(count)
}

fn filter_clause(
    status: Option<EnquiryStatus>,
    assignee: Option<&Uuid>,
) -> (String, Vec<String>) {
    let mut clauses = Vec::new();
    let mut values = Vec::new();
    if let Some(status) = status {
        values.push(status.as_str().to_string());
        clauses.push(format!("status = ?{}", values.len()));
    }
    if let Some(assignee) = assignee {
        values.push(assignee.to_string());
        clauses.push(format!("assignee = ?{}", values.len()));
    }
    if clauses.is_empty() {
        (String::new(), values)
    } else {
        (format!("WHERE {}", clauses.join(" AND ")), values)
    }
}

// Internal row type for Enquiry mapping
struct EnquiryRow {
    id: String,
    patient_name: String,
    patient_age: i64,
    patient_mob: String,
    patient_gender: Option<String>,
    message: String,
    service: String,
    status: String,
    assignee: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

fn row_to_enquiry_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EnquiryRow> {
    Ok(EnquiryRow {
        id: row.get(0)?,
        patient_name: row.get(1)?,
        patient_age: row.get(2)?,
        patient_mob: row.get(3)?,
        patient_gender: row.get(4)?,
        message: row.get(5)?,
        service: row.get(6)?,
        status: row.get(7)?,
        assignee: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn enquiry_from_row(row: EnquiryRow) -> Result<Enquiry, DatabaseError> {
    Ok(Enquiry {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        patient_name: row.patient_name,
        patient_age: row.patient_age,
        patient_mob: row.patient_mob,
        patient_gender: row
            .patient_gender
            .as_deref()
            .map(Gender::from_str)
            .transpose()?,
        message: row.message,
        service: ServiceCategory::from_str(&row.service)?,
        status: EnquiryStatus::from_str(&row.status)?,
        assignee: row
            .assignee
            .as_deref()
            .and_then(|id| Uuid::parse_str(id).ok()),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
