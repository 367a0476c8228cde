//! Shared application state: where the database lives.
//!
//! Handlers open a connection per request; migrations are version-guarded
//! so the open path stays cheap after the first run.

use std::path::PathBuf;

use rusqlite::Connection;

use crate::db::{self, DatabaseError};

pub struct AppState {
    db_path: PathBuf,
}

impl AppState {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Open a database connection for one request.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_database(&self.db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_db_creates_and_reopens_the_same_file() {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::new(tmp.path().join("caredesk.db"));

        {
            let conn = state.open_db().unwrap();
            conn.execute(
                "INSERT INTO services (id, title, description, perks, book_via, created_at, updated_at)
                 VALUES ('s1', 'Home Care', 'desc', '[]', '0000000000',
                         '2026-01-01T00:00:00+00:00', '2026-01-01T00:00:00+00:00')",
                [],
            )
            .unwrap();
        }

        let conn = state.open_db().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM services", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
