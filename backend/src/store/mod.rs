//! SQLite-backed persistence.
//!
//! A `Store` is just the database path; every operation opens its own
//! short-lived connection. Submission, petition/signature and outbox
//! operations live in their own files as further `impl Store` blocks.

mod outbox;
mod petitions;
mod schema;
mod submissions;

pub use outbox::OutboxRow;

use chrono::Utc;
use rusqlite::{params, Connection};

use common::model::metadata::ClientMetadata;

#[derive(Clone)]
pub struct Store {
    db_path: String,
}

impl Store {
    pub fn new(db_path: impl Into<String>) -> Self {
        Store {
            db_path: db_path.into(),
        }
    }

    /// Create tables and seed data. Safe to call on every startup.
    pub fn init(&self) -> Result<(), rusqlite::Error> {
        let conn = self.open()?;
        conn.execute_batch(schema::INIT_SQL)?;
        conn.execute_batch(schema::SEED_PETITION_SQL)?;
        Ok(())
    }

    pub(crate) fn open(&self) -> Result<Connection, rusqlite::Error> {
        Connection::open(&self.db_path)
    }

    /// Append an audit entry for operator-initiated bulk actions.
    pub fn record_audit(&self, action: &str, detail: &str) -> Result<(), rusqlite::Error> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO audit_log (action, detail, created_at) VALUES (?1, ?2, ?3)",
            params![action, detail, Utc::now()],
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn audit_entries(&self, action: &str) -> Result<Vec<String>, rusqlite::Error> {
        let conn = self.open()?;
        let mut stmt =
            conn.prepare("SELECT detail FROM audit_log WHERE action = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![action], |row| row.get(0))?;
        rows.collect()
    }
}

/// Serialize metadata for its JSON text column.
pub(crate) fn metadata_to_sql(metadata: &ClientMetadata) -> String {
    serde_json::to_string(metadata).unwrap_or_else(|_| "{}".to_string())
}

/// Deserialize the metadata column, tolerating rows written before a field
/// existed.
pub(crate) fn metadata_from_sql(raw: &str) -> ClientMetadata {
    serde_json::from_str(raw).unwrap_or_default()
}
