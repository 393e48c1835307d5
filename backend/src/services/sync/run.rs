//! The sync flow itself.
//!
//! Steps, in order, with no rollback on partial failure: required-config
//! check, unsynced query (oldest first), worksheet discovery, row mapping,
//! one batch append, marker update, summary. A zero-row run is a valid
//! terminal state that returns before any spreadsheet traffic. Concurrent
//! invocations (endpoint and outbox worker alike) are serialized through
//! `SyncGuard` so the same rows cannot be appended twice; the
//! append-then-mark pair is still not atomic across a crash, in which case
//! the affected rows are exported again on the next run.

use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use log::{error, info};
use tokio::sync::Mutex;

use common::requests::{SyncDetails, SyncError, SyncSummary};

use crate::config::required_env;
use crate::sheets::{SheetsClient, SpreadsheetApi};
use crate::store::Store;

use super::rows::{map_row, APPEND_RANGE, SHEET_NAME};

/// Serializes sync runs within this process.
#[derive(Default)]
pub struct SyncGuard(Mutex<()>);

/// Actix handler for `POST /api/sync/sheets`.
pub(crate) async fn process(
    store: web::Data<Store>,
    guard: web::Data<SyncGuard>,
) -> impl Responder {
    match run_pipeline(&store, &guard).await {
        Ok(summary) => {
            info!("sheet sync: {}", summary.message);
            HttpResponse::Ok().json(summary)
        }
        Err(details) => {
            error!("sheet sync failed: {details}");
            HttpResponse::InternalServerError().json(SyncError {
                error: "Sheet sync failed".to_string(),
                details,
            })
        }
    }
}

/// Full pipeline against the real Sheets API. Also invoked by the outbox
/// worker after each form submit.
pub(crate) async fn run_pipeline(store: &Store, guard: &SyncGuard) -> Result<SyncSummary, String> {
    let _serialized = guard.0.lock().await;

    // Required configuration first; the error names the missing variable.
    let credentials = required_env("GOOGLE_SERVICE_ACCOUNT_JSON")?;
    let spreadsheet_id = required_env("SHEETS_SPREADSHEET_ID")?;

    // Constructing the client only parses credentials; the OAuth grant
    // happens on the first API call, after the zero-row early return.
    let client =
        SheetsClient::new(&credentials, spreadsheet_id.clone()).map_err(|e| e.to_string())?;
    sync_pending(store, &client, &spreadsheet_id).await
}

/// Steps 2–8 against any `SpreadsheetApi` implementation.
pub(crate) async fn sync_pending<S: SpreadsheetApi>(
    store: &Store,
    sheets: &S,
    spreadsheet_id: &str,
) -> Result<SyncSummary, String> {
    let pending = store.list_unsynced().map_err(|e| e.to_string())?;
    if pending.is_empty() {
        return Ok(SyncSummary {
            message: "No new submissions to sync".to_string(),
            details: SyncDetails {
                total_submissions: 0,
                synced_rows: 0,
                spreadsheet_id: None,
                sheet_name: None,
            },
        });
    }

    let titles = sheets.sheet_titles().await.map_err(|e| e.to_string())?;
    if !titles.iter().any(|t| t == SHEET_NAME) {
        return Err(format!(
            "Worksheet '{SHEET_NAME}' not found in spreadsheet; existing sheets: {}",
            titles.join(", ")
        ));
    }

    let mapped: Vec<Vec<String>> = pending.iter().map(map_row).collect();
    let appended = sheets
        .append_rows(APPEND_RANGE, &mapped)
        .await
        .map_err(|e| e.to_string())?;

    let ids: Vec<String> = pending.iter().map(|s| s.id.clone()).collect();
    store
        .mark_synced(&ids, Utc::now())
        .map_err(|e| e.to_string())?;

    Ok(SyncSummary {
        message: format!("Synced {appended} submissions to Google Sheets"),
        details: SyncDetails {
            total_submissions: pending.len(),
            synced_rows: appended,
            spreadsheet_id: Some(spreadsheet_id.to_string()),
            sheet_name: Some(SHEET_NAME.to_string()),
        },
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;
    use chrono::TimeZone;
    use chrono::Utc;

    use common::model::metadata::ClientMetadata;
    use common::model::submission::{Submission, SubmissionKind};

    use crate::sheets::SheetsError;

    use super::*;

    /// In-memory stand-in for the Sheets API: a list of tab titles and the
    /// sheet's data rows, plus a counter of every call made.
    struct FakeSheets {
        titles: Vec<String>,
        rows: StdMutex<Vec<Vec<String>>>,
        calls: AtomicUsize,
        fail_append: bool,
    }

    impl FakeSheets {
        fn with_existing_rows(existing: usize) -> Self {
            let rows = (0..existing)
                .map(|i| vec![format!("existing-{i}")])
                .collect();
            FakeSheets {
                titles: vec!["Submissions".to_string(), "Notes".to_string()],
                rows: StdMutex::new(rows),
                calls: AtomicUsize::new(0),
                fail_append: false,
            }
        }
    }

    #[async_trait]
    impl SpreadsheetApi for FakeSheets {
        async fn sheet_titles(&self) -> Result<Vec<String>, SheetsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.titles.clone())
        }

        async fn append_rows(
            &self,
            _range: &str,
            rows: &[Vec<String>],
        ) -> Result<usize, SheetsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_append {
                return Err(SheetsError::Api {
                    status: 503,
                    message: "backend unavailable".to_string(),
                });
            }
            self.rows.lock().unwrap().extend(rows.iter().cloned());
            Ok(rows.len())
        }
    }

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("test.sqlite").to_string_lossy().to_string());
        store.init().unwrap();
        (dir, store)
    }

    fn submission(id: &str, minute: u32) -> Submission {
        Submission {
            id: id.to_string(),
            kind: SubmissionKind::ScamReport,
            full_name: format!("Person {id}"),
            email: format!("{id}@example.org"),
            newsletter_opt_in: false,
            metadata: ClientMetadata::default(),
            created_at: Utc.with_ymd_and_hms(2025, 4, 7, 9, minute, 0).unwrap(),
            synced_at: None,
        }
    }

    #[tokio::test]
    async fn three_pending_rows_append_in_creation_order_after_existing_data() {
        let (_dir, store) = test_store();
        for (id, minute) in [("a", 0), ("b", 5), ("c", 10)] {
            store.insert_submission(&submission(id, minute)).unwrap();
        }
        let sheets = FakeSheets::with_existing_rows(1);

        let summary = sync_pending(&store, &sheets, "sheet-1").await.unwrap();

        assert_eq!(summary.details.total_submissions, 3);
        assert_eq!(summary.details.synced_rows, 3);
        assert_eq!(summary.details.sheet_name.as_deref(), Some("Submissions"));

        let rows = sheets.rows.lock().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], ["existing-0"]);
        assert_eq!(rows[1][2], "Person a");
        assert_eq!(rows[2][2], "Person b");
        assert_eq!(rows[3][2], "Person c");

        // Every previously-unsynced row now carries a marker.
        assert!(store.list_unsynced().unwrap().is_empty());
        let synced = store
            .get_submission(SubmissionKind::ScamReport, "a")
            .unwrap()
            .unwrap();
        assert!(synced.synced_at.is_some());
    }

    #[tokio::test]
    async fn second_invocation_appends_nothing() {
        let (_dir, store) = test_store();
        for (id, minute) in [("a", 0), ("b", 5), ("c", 10)] {
            store.insert_submission(&submission(id, minute)).unwrap();
        }
        let sheets = FakeSheets::with_existing_rows(0);

        sync_pending(&store, &sheets, "sheet-1").await.unwrap();
        let again = sync_pending(&store, &sheets, "sheet-1").await.unwrap();

        assert_eq!(sheets.rows.lock().unwrap().len(), 3);
        assert_eq!(again.message, "No new submissions to sync");
        assert_eq!(again.details.total_submissions, 0);
        assert_eq!(again.details.synced_rows, 0);
    }

    #[tokio::test]
    async fn zero_pending_rows_never_contact_the_spreadsheet_service() {
        let (_dir, store) = test_store();
        let sheets = FakeSheets::with_existing_rows(0);

        let summary = sync_pending(&store, &sheets, "sheet-1").await.unwrap();

        assert_eq!(summary.message, "No new submissions to sync");
        assert_eq!(summary.details.total_submissions, 0);
        assert_eq!(summary.details.synced_rows, 0);
        assert!(summary.details.spreadsheet_id.is_none());
        assert_eq!(sheets.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_worksheet_fails_listing_the_tabs_that_exist() {
        let (_dir, store) = test_store();
        store.insert_submission(&submission("a", 0)).unwrap();
        let sheets = FakeSheets {
            titles: vec!["Sheet1".to_string(), "Archive".to_string()],
            rows: StdMutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail_append: false,
        };

        let err = sync_pending(&store, &sheets, "sheet-1").await.unwrap_err();
        assert!(err.contains("'Submissions'"));
        assert!(err.contains("Sheet1, Archive"));

        // Nothing was appended, so the marker stays null for the next run.
        assert_eq!(store.list_unsynced().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn append_failure_leaves_markers_null_for_retry() {
        let (_dir, store) = test_store();
        store.insert_submission(&submission("a", 0)).unwrap();
        let sheets = FakeSheets {
            fail_append: true,
            ..FakeSheets::with_existing_rows(0)
        };

        let err = sync_pending(&store, &sheets, "sheet-1").await.unwrap_err();
        assert!(err.contains("503"));
        assert_eq!(store.list_unsynced().unwrap().len(), 1);
    }
}
