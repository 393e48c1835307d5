use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use uuid::Uuid;

use common::model::submission::Submission;
use common::requests::{NewSubmission, SubmissionAccepted};

use crate::outbox::{OutboxState, OutboxTask};
use crate::store::Store;

pub(crate) async fn process(
    store: web::Data<Store>,
    outbox: web::Data<OutboxState>,
    payload: web::Json<NewSubmission>,
) -> impl Responder {
    let request = payload.into_inner();
    if let Err(reason) = validate(&request) {
        return HttpResponse::BadRequest().body(reason);
    }
    match create_submission(&store, &outbox, request) {
        Ok(id) => HttpResponse::Ok().json(SubmissionAccepted { id }),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error saving submission: {e}"))
        }
    }
}

/// Same superficial check the form applies client-side; nothing stricter
/// happens server-side.
fn validate(request: &NewSubmission) -> Result<(), String> {
    if request.full_name.trim().is_empty() {
        return Err("Full name is required".to_string());
    }
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err("A valid email is required".to_string());
    }
    Ok(())
}

/// Persist first; every auxiliary side effect goes through the outbox and
/// cannot fail this request.
fn create_submission(
    store: &Store,
    outbox: &OutboxState,
    request: NewSubmission,
) -> Result<String, String> {
    let submission = Submission {
        id: Uuid::new_v4().to_string(),
        kind: request.kind,
        full_name: request.full_name,
        email: request.email,
        newsletter_opt_in: request.newsletter_opt_in,
        metadata: request.metadata,
        created_at: Utc::now(),
        synced_at: None,
    };
    store
        .insert_submission(&submission)
        .map_err(|e| e.to_string())?;

    if submission.newsletter_opt_in {
        outbox.enqueue(
            store,
            &OutboxTask::NewsletterSignup {
                email: submission.email.clone(),
                full_name: submission.full_name.clone(),
            },
        );
    }
    outbox.enqueue(
        store,
        &OutboxTask::ConfirmationEmail {
            email: submission.email.clone(),
            full_name: submission.full_name.clone(),
            form: submission.kind.as_str().to_string(),
        },
    );
    outbox.enqueue(
        store,
        &OutboxTask::AdminAlert {
            form: submission.kind.as_str().to_string(),
            full_name: submission.full_name.clone(),
            email: submission.email.clone(),
        },
    );
    outbox.enqueue(store, &OutboxTask::SheetSync);

    Ok(submission.id)
}

#[cfg(test)]
mod tests {
    use common::model::metadata::ClientMetadata;
    use common::model::submission::SubmissionKind;

    use super::*;

    fn request(name: &str, email: &str) -> NewSubmission {
        NewSubmission {
            kind: SubmissionKind::ScamReport,
            full_name: name.to_string(),
            email: email.to_string(),
            newsletter_opt_in: true,
            metadata: ClientMetadata::default(),
        }
    }

    #[test]
    fn validation_requires_name_and_plausible_email() {
        assert!(validate(&request("Ana Ruiz", "ana@example.org")).is_ok());
        assert!(validate(&request("  ", "ana@example.org")).is_err());
        assert!(validate(&request("Ana Ruiz", "")).is_err());
        assert!(validate(&request("Ana Ruiz", "not-an-email")).is_err());
    }

    #[tokio::test]
    async fn submission_is_persisted_and_side_effects_are_queued() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("test.sqlite").to_string_lossy().to_string());
        store.init().unwrap();
        let (tx, _rx) = tokio::sync::mpsc::channel(8);
        let outbox = OutboxState::new(tx);

        let id = create_submission(&store, &outbox, request("Ana Ruiz", "ana@example.org"))
            .unwrap();

        let saved = store
            .get_submission(SubmissionKind::ScamReport, &id)
            .unwrap()
            .unwrap();
        assert!(saved.synced_at.is_none());

        // Opted in: newsletter + confirmation + admin alert + sync nudge.
        let queued = store.due_outbox(10).unwrap();
        let names: Vec<String> = queued.into_iter().map(|t| t.task).collect();
        assert_eq!(
            names,
            [
                "newsletter_signup",
                "confirmation_email",
                "admin_alert",
                "sheet_sync"
            ]
        );
    }
}
