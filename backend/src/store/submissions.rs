//! Submission table operations.
//!
//! One generic set of operations serves all four form kinds; admin list /
//! get / delete / delete-all all go through here, as does the sync flow's
//! unsynced scan and marker update.

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Row};

use common::model::submission::{Submission, SubmissionKind};

use super::{metadata_from_sql, metadata_to_sql, Store};

const SELECT_COLUMNS: &str =
    "id, kind, full_name, email, newsletter_opt_in, metadata, created_at, synced_at";

fn submission_from_row(row: &Row<'_>) -> rusqlite::Result<Submission> {
    let kind_raw: String = row.get(1)?;
    let kind = SubmissionKind::parse(&kind_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            format!("unknown submission kind '{kind_raw}'").into(),
        )
    })?;
    let metadata_raw: String = row.get(5)?;
    Ok(Submission {
        id: row.get(0)?,
        kind,
        full_name: row.get(2)?,
        email: row.get(3)?,
        newsletter_opt_in: row.get(4)?,
        metadata: metadata_from_sql(&metadata_raw),
        created_at: row.get(6)?,
        synced_at: row.get(7)?,
    })
}

impl Store {
    pub fn insert_submission(&self, submission: &Submission) -> Result<(), rusqlite::Error> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO submissions \
             (id, kind, full_name, email, newsletter_opt_in, metadata, created_at, synced_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                submission.id,
                submission.kind.as_str(),
                submission.full_name,
                submission.email,
                submission.newsletter_opt_in,
                metadata_to_sql(&submission.metadata),
                submission.created_at,
                submission.synced_at,
            ],
        )?;
        Ok(())
    }

    /// Full row set for a kind, creation-descending (the admin list order).
    pub fn list_submissions(
        &self,
        kind: SubmissionKind,
    ) -> Result<Vec<Submission>, rusqlite::Error> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM submissions WHERE kind = ?1 ORDER BY created_at DESC"
        ))?;
        let rows = stmt.query_map(params![kind.as_str()], submission_from_row)?;
        rows.collect()
    }

    pub fn get_submission(
        &self,
        kind: SubmissionKind,
        id: &str,
    ) -> Result<Option<Submission>, rusqlite::Error> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM submissions WHERE kind = ?1 AND id = ?2"
        ))?;
        let mut rows = stmt.query_map(params![kind.as_str(), id], submission_from_row)?;
        rows.next().transpose()
    }

    /// Delete one row; false when no row matched.
    pub fn delete_submission(
        &self,
        kind: SubmissionKind,
        id: &str,
    ) -> Result<bool, rusqlite::Error> {
        let conn = self.open()?;
        let changed = conn.execute(
            "DELETE FROM submissions WHERE kind = ?1 AND id = ?2",
            params![kind.as_str(), id],
        )?;
        Ok(changed > 0)
    }

    /// The single named remove-everything operation for a kind. Writes its
    /// own audit entry in the same transaction as the delete.
    pub fn delete_all_submissions(&self, kind: SubmissionKind) -> Result<usize, rusqlite::Error> {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        let deleted = tx.execute(
            "DELETE FROM submissions WHERE kind = ?1",
            params![kind.as_str()],
        )?;
        tx.execute(
            "INSERT INTO audit_log (action, detail, created_at) VALUES (?1, ?2, ?3)",
            params![
                "delete_all",
                format!("kind={} deleted={}", kind.as_str(), deleted),
                Utc::now(),
            ],
        )?;
        tx.commit()?;
        Ok(deleted)
    }

    /// Rows not yet exported to the spreadsheet, oldest first so the append
    /// order is stable.
    pub fn list_unsynced(&self) -> Result<Vec<Submission>, rusqlite::Error> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM submissions WHERE synced_at IS NULL \
             ORDER BY created_at ASC"
        ))?;
        let rows = stmt.query_map([], submission_from_row)?;
        rows.collect()
    }

    /// Set the sync marker on exactly the given ids.
    pub fn mark_synced(
        &self,
        ids: &[String],
        synced_at: DateTime<Utc>,
    ) -> Result<usize, rusqlite::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let conn = self.open()?;
        let placeholders = (2..ids.len() + 2)
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE submissions SET synced_at = ?1 WHERE synced_at IS NULL AND id IN ({placeholders})"
        );
        let mut values: Vec<rusqlite::types::Value> = Vec::with_capacity(ids.len() + 1);
        values.push(synced_at.to_rfc3339().into());
        for id in ids {
            values.push(id.clone().into());
        }
        conn.execute(&sql, params_from_iter(values))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use common::model::metadata::ClientMetadata;

    use super::*;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("test.sqlite").to_string_lossy().to_string());
        store.init().unwrap();
        (dir, store)
    }

    fn submission(id: &str, kind: SubmissionKind, minute: u32) -> Submission {
        Submission {
            id: id.to_string(),
            kind,
            full_name: format!("Person {id}"),
            email: format!("{id}@example.org"),
            newsletter_opt_in: true,
            metadata: ClientMetadata {
                city: Some("Orlando".to_string()),
                ..ClientMetadata::default()
            },
            created_at: Utc.with_ymd_and_hms(2025, 4, 7, 9, minute, 0).unwrap(),
            synced_at: None,
        }
    }

    #[test]
    fn list_is_creation_descending_and_unsynced_is_ascending() {
        let (_dir, store) = test_store();
        for (id, minute) in [("a", 0), ("b", 5), ("c", 10)] {
            store
                .insert_submission(&submission(id, SubmissionKind::ScamReport, minute))
                .unwrap();
        }

        let listed = store.list_submissions(SubmissionKind::ScamReport).unwrap();
        assert_eq!(
            listed.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            ["c", "b", "a"]
        );

        let unsynced = store.list_unsynced().unwrap();
        assert_eq!(
            unsynced.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            ["a", "b", "c"]
        );
    }

    #[test]
    fn metadata_round_trips_through_the_json_column() {
        let (_dir, store) = test_store();
        let mut sub = submission("m1", SubmissionKind::BeforeYouSign, 0);
        sub.metadata.browser = Some("Firefox".to_string());
        sub.metadata.latitude = Some(28.5384);
        store.insert_submission(&sub).unwrap();

        let loaded = store
            .get_submission(SubmissionKind::BeforeYouSign, "m1")
            .unwrap()
            .unwrap();
        assert_eq!(loaded.metadata, sub.metadata);
        assert_eq!(loaded.created_at, sub.created_at);
    }

    #[test]
    fn mark_synced_touches_only_the_given_unsynced_ids() {
        let (_dir, store) = test_store();
        for (id, minute) in [("a", 0), ("b", 5), ("c", 10)] {
            store
                .insert_submission(&submission(id, SubmissionKind::ScamReport, minute))
                .unwrap();
        }

        let now = Utc::now();
        let updated = store
            .mark_synced(&["a".to_string(), "b".to_string()], now)
            .unwrap();
        assert_eq!(updated, 2);

        let unsynced = store.list_unsynced().unwrap();
        assert_eq!(unsynced.len(), 1);
        assert_eq!(unsynced[0].id, "c");

        // A second pass over the same ids is a no-op: the marker is set
        // exactly once.
        let updated_again = store
            .mark_synced(&["a".to_string(), "b".to_string()], Utc::now())
            .unwrap();
        assert_eq!(updated_again, 0);
    }

    #[test]
    fn delete_all_scopes_to_the_kind_and_leaves_an_audit_entry() {
        let (_dir, store) = test_store();
        store
            .insert_submission(&submission("a", SubmissionKind::ScamReport, 0))
            .unwrap();
        store
            .insert_submission(&submission("b", SubmissionKind::ScamReport, 1))
            .unwrap();
        store
            .insert_submission(&submission("x", SubmissionKind::TimeshareChecklist, 2))
            .unwrap();

        let deleted = store
            .delete_all_submissions(SubmissionKind::ScamReport)
            .unwrap();
        assert_eq!(deleted, 2);
        assert!(store
            .list_submissions(SubmissionKind::ScamReport)
            .unwrap()
            .is_empty());
        assert_eq!(
            store
                .list_submissions(SubmissionKind::TimeshareChecklist)
                .unwrap()
                .len(),
            1
        );

        let audit = store.audit_entries("delete_all").unwrap();
        assert_eq!(audit, ["kind=scam_report deleted=2"]);
    }

    #[test]
    fn delete_one_reports_whether_a_row_matched() {
        let (_dir, store) = test_store();
        store
            .insert_submission(&submission("a", SubmissionKind::ScamReport, 0))
            .unwrap();

        assert!(store
            .delete_submission(SubmissionKind::ScamReport, "a")
            .unwrap());
        assert!(!store
            .delete_submission(SubmissionKind::ScamReport, "a")
            .unwrap());
    }
}
