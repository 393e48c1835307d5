//! Background task that drains the outbox.
//!
//! Spawned once from `main.rs`. Wakes on a nudge from `OutboxState` or on
//! a one-minute interval, then walks the pending rows oldest first. A
//! delivery failure increments the row's attempt counter and is logged;
//! nothing here ever reaches an end user.

use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::mailer::Mailer;
use crate::outbox::OutboxTask;
use crate::services::sync::{run_pipeline, SyncGuard};
use crate::store::{OutboxRow, Store};

const DRAIN_BATCH: i64 = 50;
const DRAIN_INTERVAL: Duration = Duration::from_secs(60);

pub async fn run(store: Store, config: Config, guard: Arc<SyncGuard>, mut rx: mpsc::Receiver<()>) {
    let mut tick = tokio::time::interval(DRAIN_INTERVAL);
    loop {
        tokio::select! {
            _ = tick.tick() => {}
            nudge = rx.recv() => {
                if nudge.is_none() {
                    info!("outbox channel closed; worker stopping");
                    break;
                }
            }
        }
        drain_pending(&store, &config, &guard).await;
    }
}

async fn drain_pending(store: &Store, config: &Config, guard: &Arc<SyncGuard>) {
    let due = match store.due_outbox(DRAIN_BATCH) {
        Ok(due) => due,
        Err(e) => {
            error!("could not read outbox: {e}");
            return;
        }
    };
    if due.is_empty() {
        return;
    }

    let mailer = config
        .brevo_api_key
        .clone()
        .map(|key| Mailer::new(key, config.sender_email.clone()));

    for row in due {
        match deliver(&row, mailer.as_ref(), store, config, guard).await {
            Ok(()) => {
                if let Err(e) = store.mark_outbox_sent(&row.id) {
                    error!("delivered outbox task {} but could not mark it: {e}", row.id);
                }
            }
            Err(err) => {
                warn!("outbox task {} ({}) failed: {err}", row.id, row.task);
                if let Err(e) = store.mark_outbox_failed(&row.id, &err) {
                    error!("could not record outbox failure for {}: {e}", row.id);
                }
            }
        }
    }
}

async fn deliver(
    row: &OutboxRow,
    mailer: Option<&Mailer>,
    store: &Store,
    config: &Config,
    guard: &Arc<SyncGuard>,
) -> Result<(), String> {
    let task: OutboxTask =
        serde_json::from_str(&row.payload).map_err(|e| format!("invalid payload: {e}"))?;

    match task {
        OutboxTask::NewsletterSignup { email, full_name } => {
            require_mailer(mailer)?
                .add_contact(&email, &full_name)
                .await
                .map_err(|e| e.to_string())
        }
        OutboxTask::ConfirmationEmail {
            email,
            full_name,
            form,
        } => {
            let html = format!(
                "<p>Hi {full_name},</p>\
                 <p>We received your {} request and will be in touch shortly. \
                 Thank you for standing with us.</p>",
                form.replace('_', " ")
            );
            require_mailer(mailer)?
                .send_email(&email, Some(&full_name), "We received your request", &html)
                .await
                .map_err(|e| e.to_string())
        }
        OutboxTask::AdminAlert {
            form,
            full_name,
            email,
        } => {
            let to = config
                .admin_notify_email
                .as_deref()
                .ok_or("ADMIN_NOTIFY_EMAIL is not configured")?;
            let html =
                format!("<p>New {form} submission from {full_name} &lt;{email}&gt;.</p>");
            require_mailer(mailer)?
                .send_email(to, None, &format!("New {form} submission"), &html)
                .await
                .map_err(|e| e.to_string())
        }
        OutboxTask::SheetSync => run_pipeline(store, guard).await.map(|summary| {
            info!("background sheet sync: {}", summary.message);
        }),
    }
}

fn require_mailer<'a>(mailer: Option<&'a Mailer>) -> Result<&'a Mailer, String> {
    mailer.ok_or_else(|| "BREVO_API_KEY is not configured".to_string())
}
