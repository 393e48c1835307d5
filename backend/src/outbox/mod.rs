//! Outbox for auxiliary side effects.
//!
//! Form handlers persist the user's record first, then hand every
//! follow-up action (newsletter contact, confirmation email, admin alert,
//! spreadsheet sync nudge) to this module instead of awaiting third-party
//! calls inline. Tasks are durable rows in the `outbox` table; a shared
//! `OutboxState` is injected into the Actix application state and carries
//! the channel that nudges the background worker, which also wakes on its
//! own interval to retry earlier failures.

pub mod worker;

use log::error;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::store::Store;

/// One deferred side effect, serialized whole into the row payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "snake_case")]
pub enum OutboxTask {
    NewsletterSignup {
        email: String,
        full_name: String,
    },
    ConfirmationEmail {
        email: String,
        full_name: String,
        form: String,
    },
    AdminAlert {
        form: String,
        full_name: String,
        email: String,
    },
    SheetSync,
}

impl OutboxTask {
    pub fn name(&self) -> &'static str {
        match self {
            OutboxTask::NewsletterSignup { .. } => "newsletter_signup",
            OutboxTask::ConfirmationEmail { .. } => "confirmation_email",
            OutboxTask::AdminAlert { .. } => "admin_alert",
            OutboxTask::SheetSync => "sheet_sync",
        }
    }
}

/// Shared handle for enqueueing tasks, injected as `web::Data` in
/// `main.rs`.
#[derive(Clone)]
pub struct OutboxState {
    nudge: mpsc::Sender<()>,
}

impl OutboxState {
    pub fn new(nudge: mpsc::Sender<()>) -> Self {
        OutboxState { nudge }
    }

    /// Persist a task and wake the worker. Failures are logged and
    /// swallowed: an outbox problem must never fail the request that has
    /// already durably recorded the user's submission.
    pub fn enqueue(&self, store: &Store, task: &OutboxTask) {
        let payload = match serde_json::to_string(task) {
            Ok(payload) => payload,
            Err(e) => {
                error!("could not serialize outbox task {}: {e}", task.name());
                return;
            }
        };
        if let Err(e) = store.enqueue_outbox(task.name(), &payload) {
            error!("could not enqueue outbox task {}: {e}", task.name());
            return;
        }
        // A full nudge channel is fine; the worker is already awake.
        let _ = self.nudge.try_send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_payloads_round_trip() {
        let task = OutboxTask::ConfirmationEmail {
            email: "ana@example.org".to_string(),
            full_name: "Ana".to_string(),
            form: "scam_report".to_string(),
        };
        let payload = serde_json::to_string(&task).unwrap();
        assert!(payload.contains("\"task\":\"confirmation_email\""));

        let parsed: OutboxTask = serde_json::from_str(&payload).unwrap();
        assert_eq!(parsed.name(), "confirmation_email");

        let sync = serde_json::to_string(&OutboxTask::SheetSync).unwrap();
        let parsed: OutboxTask = serde_json::from_str(&sync).unwrap();
        assert_eq!(parsed.name(), "sheet_sync");
    }
}
