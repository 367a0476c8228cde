use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Gender, Patient};

const COLUMNS: &str = "patient_mob, patient_name, patient_age, patient_gender,
     queries_raised, created_at, updated_at";

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (patient_mob, patient_name, patient_age, patient_gender,
         queries_raised, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            patient.patient_mob,
            patient.patient_name,
            patient.patient_age,
            patient.patient_gender.as_str(),
            serde_json::to_string(&patient.queries_raised)?,
            patient.created_at,
            patient.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_patient_by_mobile(
    conn: &Connection,
    mobile: &str,
) -> Result<Option<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM patients WHERE patient_mob = ?1"
    ))?;
    let result = stmt.query_row(params![mobile], row_to_patient_row);
    match result {
        Ok(row) => Ok(Some(patient_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write back every mutable column of an existing patient.
pub fn update_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE patients SET patient_name = ?2, patient_age = ?3, patient_gender = ?4,
         queries_raised = ?5, updated_at = ?6
         WHERE patient_mob = ?1",
        params![
            patient.patient_mob,
            patient.patient_name,
            patient.patient_age,
            patient.patient_gender.as_str(),
            serde_json::to_string(&patient.queries_raised)?,
            patient.updated_at,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Patient".into(),
            id: patient.patient_mob.clone(),
        });
    }
    Ok(())
}

/// List patients, newest first. `limit < 0` means no limit.
pub fn list_patients(
    conn: &Connection,
    limit: i64,
    offset: i64,
) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM patients ORDER BY created_at DESC, patient_mob
         LIMIT {limit} OFFSET {offset}"
    ))?;
    let rows = stmt.query_map([], row_to_patient_row)?;

    let mut patients = Vec::new();
    for row in rows {
        patients.push(patient_from_row(row?)?);
    }
    Ok(patients)
}

pub fn count_patients(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    Ok(count)
}

// Internal row type for Patient mapping
struct PatientRow {
    patient_mob: String,
    patient_name: String,
    patient_age: String,
    patient_gender: String,
    queries_raised: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

fn row_to_patient_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        patient_mob: row.get(0)?,
        patient_name: row.get(1)?,
        patient_age: row.get(2)?,
        patient_gender: row.get(3)?,
        queries_raised: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn patient_from_row(row: PatientRow) -> Result<Patient, DatabaseError> {
    let queries_raised: Vec<Uuid> = serde_json::from_str(&row.queries_raised)?;
    Ok(Patient {
        patient_mob: row.patient_mob,
        patient_name: row.patient_name,
        patient_age: row.patient_age,
        patient_gender: Gender::from_str(&row.patient_gender)?,
        queries_raised,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
