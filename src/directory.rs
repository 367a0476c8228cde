//! Patient directory — read-mostly projections over the profiles the
//! intake path maintains.

use rusqlite::Connection;
use thiserror::Error;

use crate::db::{self, DatabaseError};
use crate::models::{Page, Patient};

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("patient {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Db(#[from] DatabaseError),
}

pub fn list_patients(
    conn: &Connection,
    page: i64,
    limit: i64,
) -> Result<Page<Patient>, DirectoryError> {
    let page = page.max(1);
    let limit = limit.max(1);
    let offset = (page - 1) * limit;

    let data = db::list_patients(conn, limit, offset)?;
    let total = db::count_patients(conn)?;
    Ok(Page::new(data, total, page, limit))
}

pub fn get_patient(conn: &Connection, mobile: &str) -> Result<Patient, DirectoryError> {
    db::get_patient_by_mobile(conn, mobile)?
        .ok_or_else(|| DirectoryError::NotFound(mobile.to_string()))
}

pub fn list_all_for_export(conn: &Connection) -> Result<Vec<Patient>, DirectoryError> {
    Ok(db::list_patients(conn, -1, 0)?)
}
