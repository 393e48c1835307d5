//! Petition and signature operations.
//!
//! The live `COUNT(*)` over signatures is the canonical signature total
//! everywhere a petition is read; the `signature_count` column is a cache
//! refreshed inside the same transaction as each signature insert.

use rusqlite::{params, Row};

use common::model::petition::{Petition, Signature};

use super::{metadata_from_sql, metadata_to_sql, Store};

const PETITION_SELECT: &str = "SELECT p.id, p.title, p.story, p.goal, \
     (SELECT COUNT(*) FROM signatures s WHERE s.petition_id = p.id) AS live_count, \
     p.created_at \
     FROM petitions p";

fn petition_from_row(row: &Row<'_>) -> rusqlite::Result<Petition> {
    Ok(Petition {
        id: row.get(0)?,
        title: row.get(1)?,
        story: row.get(2)?,
        goal: row.get(3)?,
        signature_count: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn signature_from_row(row: &Row<'_>) -> rusqlite::Result<Signature> {
    let metadata_raw: String = row.get(5)?;
    Ok(Signature {
        id: row.get(0)?,
        petition_id: row.get(1)?,
        full_name: row.get(2)?,
        email: row.get(3)?,
        newsletter_opt_in: row.get(4)?,
        metadata: metadata_from_sql(&metadata_raw),
        created_at: row.get(6)?,
    })
}

impl Store {
    pub fn list_petitions(&self) -> Result<Vec<Petition>, rusqlite::Error> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!("{PETITION_SELECT} ORDER BY p.created_at DESC"))?;
        let rows = stmt.query_map([], petition_from_row)?;
        rows.collect()
    }

    pub fn get_petition(&self, id: &str) -> Result<Option<Petition>, rusqlite::Error> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!("{PETITION_SELECT} WHERE p.id = ?1"))?;
        let mut rows = stmt.query_map(params![id], petition_from_row)?;
        rows.next().transpose()
    }

    /// Insert a signature and refresh the cached counter from the live
    /// count in one transaction. Returns the live count after the insert.
    pub fn insert_signature(&self, signature: &Signature) -> Result<i64, rusqlite::Error> {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO signatures \
             (id, petition_id, full_name, email, newsletter_opt_in, metadata, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                signature.id,
                signature.petition_id,
                signature.full_name,
                signature.email,
                signature.newsletter_opt_in,
                metadata_to_sql(&signature.metadata),
                signature.created_at,
            ],
        )?;
        tx.execute(
            "UPDATE petitions SET signature_count = \
             (SELECT COUNT(*) FROM signatures WHERE petition_id = ?1) \
             WHERE id = ?1",
            params![signature.petition_id],
        )?;
        let live: i64 = tx.query_row(
            "SELECT COUNT(*) FROM signatures WHERE petition_id = ?1",
            params![signature.petition_id],
            |row| row.get(0),
        )?;
        tx.commit()?;
        Ok(live)
    }

    pub fn list_signatures(
        &self,
        petition_id: Option<&str>,
    ) -> Result<Vec<Signature>, rusqlite::Error> {
        let conn = self.open()?;
        let sql = "SELECT id, petition_id, full_name, email, newsletter_opt_in, metadata, created_at \
             FROM signatures";
        match petition_id {
            Some(petition_id) => {
                let mut stmt = conn
                    .prepare(&format!("{sql} WHERE petition_id = ?1 ORDER BY created_at DESC"))?;
                let rows = stmt.query_map(params![petition_id], signature_from_row)?;
                rows.collect()
            }
            None => {
                let mut stmt = conn.prepare(&format!("{sql} ORDER BY created_at DESC"))?;
                let rows = stmt.query_map([], signature_from_row)?;
                rows.collect()
            }
        }
    }

    pub fn delete_signature(&self, id: &str) -> Result<bool, rusqlite::Error> {
        let conn = self.open()?;
        let changed = conn.execute("DELETE FROM signatures WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Named remove-everything operation for signatures, with its audit
    /// entry in the same transaction.
    pub fn delete_all_signatures(&self) -> Result<usize, rusqlite::Error> {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM signatures", [])?;
        tx.execute(
            "INSERT INTO audit_log (action, detail, created_at) VALUES (?1, ?2, ?3)",
            params![
                "delete_all",
                format!("kind=signatures deleted={deleted}"),
                chrono::Utc::now(),
            ],
        )?;
        tx.commit()?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use common::model::metadata::ClientMetadata;

    use super::*;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("test.sqlite").to_string_lossy().to_string());
        store.init().unwrap();
        (dir, store)
    }

    fn signature(id: &str, petition_id: &str) -> Signature {
        Signature {
            id: id.to_string(),
            petition_id: petition_id.to_string(),
            full_name: format!("Signer {id}"),
            email: format!("{id}@example.org"),
            newsletter_opt_in: false,
            metadata: ClientMetadata::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn seeded_petition_exists_with_zero_signatures() {
        let (_dir, store) = test_store();
        let petition = store.get_petition("end-exit-scams").unwrap().unwrap();
        assert_eq!(petition.signature_count, 0);
        assert!(petition.goal > 0);
    }

    #[test]
    fn signature_count_is_the_live_count_and_the_cache_follows_it() {
        let (_dir, store) = test_store();

        // Skew the cached column on purpose; the served value must come
        // from the live count.
        {
            let conn = store.open().unwrap();
            conn.execute(
                "UPDATE petitions SET signature_count = 999 WHERE id = 'end-exit-scams'",
                [],
            )
            .unwrap();
        }
        let petition = store.get_petition("end-exit-scams").unwrap().unwrap();
        assert_eq!(petition.signature_count, 0);

        let live = store
            .insert_signature(&signature("s1", "end-exit-scams"))
            .unwrap();
        assert_eq!(live, 1);

        // The insert resynchronized the cache with the live count.
        let cached: i64 = store
            .open()
            .unwrap()
            .query_row(
                "SELECT signature_count FROM petitions WHERE id = 'end-exit-scams'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(cached, 1);
    }

    #[test]
    fn delete_all_signatures_audits_the_count() {
        let (_dir, store) = test_store();
        store
            .insert_signature(&signature("s1", "end-exit-scams"))
            .unwrap();
        store
            .insert_signature(&signature("s2", "end-exit-scams"))
            .unwrap();

        assert_eq!(store.delete_all_signatures().unwrap(), 2);
        assert!(store.list_signatures(None).unwrap().is_empty());
        assert_eq!(
            store.audit_entries("delete_all").unwrap(),
            ["kind=signatures deleted=2"]
        );
    }
}
