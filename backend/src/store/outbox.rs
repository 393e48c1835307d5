//! Outbox table operations.
//!
//! Side-effect tasks are rows here; the worker drains pending rows oldest
//! first. A row is "pending" until `sent_at` is set or it has burned
//! through `MAX_ATTEMPTS`.

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use super::Store;

pub const MAX_ATTEMPTS: i64 = 5;

#[derive(Debug, Clone)]
pub struct OutboxRow {
    pub id: String,
    pub task: String,
    pub payload: String,
    pub attempts: i64,
    pub created_at: DateTime<Utc>,
}

fn outbox_from_row(row: &Row<'_>) -> rusqlite::Result<OutboxRow> {
    Ok(OutboxRow {
        id: row.get(0)?,
        task: row.get(1)?,
        payload: row.get(2)?,
        attempts: row.get(3)?,
        created_at: row.get(4)?,
    })
}

impl Store {
    /// Persist a task for the worker. Returns the new row id.
    pub fn enqueue_outbox(&self, task: &str, payload: &str) -> Result<String, rusqlite::Error> {
        let conn = self.open()?;
        let id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO outbox (id, task, payload, attempts, created_at) \
             VALUES (?1, ?2, ?3, 0, ?4)",
            params![id, task, payload, Utc::now()],
        )?;
        Ok(id)
    }

    /// Pending rows, oldest first, capped at `limit`.
    pub fn due_outbox(&self, limit: i64) -> Result<Vec<OutboxRow>, rusqlite::Error> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, task, payload, attempts, created_at FROM outbox \
             WHERE sent_at IS NULL AND attempts < ?1 \
             ORDER BY created_at ASC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![MAX_ATTEMPTS, limit], outbox_from_row)?;
        rows.collect()
    }

    pub fn mark_outbox_sent(&self, id: &str) -> Result<(), rusqlite::Error> {
        let conn = self.open()?;
        conn.execute(
            "UPDATE outbox SET sent_at = ?1, last_error = NULL WHERE id = ?2",
            params![Utc::now(), id],
        )?;
        Ok(())
    }

    pub fn mark_outbox_failed(&self, id: &str, error: &str) -> Result<(), rusqlite::Error> {
        let conn = self.open()?;
        conn.execute(
            "UPDATE outbox SET attempts = attempts + 1, last_error = ?1 WHERE id = ?2",
            params![error, id],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("test.sqlite").to_string_lossy().to_string());
        store.init().unwrap();
        (dir, store)
    }

    #[test]
    fn pending_rows_drain_oldest_first_and_drop_out_when_sent() {
        let (_dir, store) = test_store();
        let first = store.enqueue_outbox("confirmation_email", "{}").unwrap();
        let second = store.enqueue_outbox("admin_alert", "{}").unwrap();

        let due = store.due_outbox(10).unwrap();
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].id, first);

        store.mark_outbox_sent(&first).unwrap();
        let due = store.due_outbox(10).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, second);
    }

    #[test]
    fn rows_are_abandoned_after_max_attempts() {
        let (_dir, store) = test_store();
        let id = store.enqueue_outbox("newsletter_signup", "{}").unwrap();

        for _ in 0..MAX_ATTEMPTS {
            store.mark_outbox_failed(&id, "connection refused").unwrap();
        }
        assert!(store.due_outbox(10).unwrap().is_empty());
    }
}
