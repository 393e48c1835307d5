use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use uuid::Uuid;

use common::model::petition::Signature;
use common::requests::{SignPetition, SignatureAccepted};

use crate::outbox::{OutboxState, OutboxTask};
use crate::store::Store;

pub(crate) async fn process(
    store: web::Data<Store>,
    outbox: web::Data<OutboxState>,
    petition_id: web::Path<String>,
    payload: web::Json<SignPetition>,
) -> impl Responder {
    let request = payload.into_inner();
    if request.full_name.trim().is_empty()
        || request.email.trim().is_empty()
        || !request.email.contains('@')
    {
        return HttpResponse::BadRequest().body("Name and a valid email are required");
    }

    match sign_petition(&store, &outbox, &petition_id, request) {
        Ok(Some(accepted)) => HttpResponse::Ok().json(accepted),
        Ok(None) => HttpResponse::NotFound().body("Petition not found"),
        Err(e) => HttpResponse::ServiceUnavailable().body(format!("Error saving signature: {e}")),
    }
}

/// Persist the signature first; notifications ride the outbox.
fn sign_petition(
    store: &Store,
    outbox: &OutboxState,
    petition_id: &str,
    request: SignPetition,
) -> Result<Option<SignatureAccepted>, String> {
    if store
        .get_petition(petition_id)
        .map_err(|e| e.to_string())?
        .is_none()
    {
        return Ok(None);
    }

    let signature = Signature {
        id: Uuid::new_v4().to_string(),
        petition_id: petition_id.to_string(),
        full_name: request.full_name,
        email: request.email,
        newsletter_opt_in: request.newsletter_opt_in,
        metadata: request.metadata,
        created_at: Utc::now(),
    };
    let signature_count = store
        .insert_signature(&signature)
        .map_err(|e| e.to_string())?;

    if signature.newsletter_opt_in {
        outbox.enqueue(
            store,
            &OutboxTask::NewsletterSignup {
                email: signature.email.clone(),
                full_name: signature.full_name.clone(),
            },
        );
    }
    outbox.enqueue(
        store,
        &OutboxTask::AdminAlert {
            form: "petition_signature".to_string(),
            full_name: signature.full_name.clone(),
            email: signature.email.clone(),
        },
    );

    Ok(Some(SignatureAccepted {
        id: signature.id,
        signature_count,
    }))
}

#[cfg(test)]
mod tests {
    use common::model::metadata::ClientMetadata;

    use super::*;

    #[test]
    fn signing_returns_the_live_count_and_404s_unknown_petitions() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("test.sqlite").to_string_lossy().to_string());
        store.init().unwrap();
        let (tx, _rx) = tokio::sync::mpsc::channel(8);
        let outbox = OutboxState::new(tx);

        let request = SignPetition {
            full_name: "Luz Prieto".to_string(),
            email: "luz@example.org".to_string(),
            newsletter_opt_in: false,
            metadata: ClientMetadata::default(),
        };

        let accepted = sign_petition(&store, &outbox, "end-exit-scams", request.clone())
            .unwrap()
            .unwrap();
        assert_eq!(accepted.signature_count, 1);

        let missing = sign_petition(&store, &outbox, "no-such-petition", request).unwrap();
        assert!(missing.is_none());
    }
}
