//! Public form submission endpoint.
//!
//! `POST /api/submissions` accepts all four form kinds. The handler
//! persists the record first; newsletter signup, confirmation email, the
//! admin alert and the spreadsheet sync nudge are enqueued on the outbox
//! afterwards, so the visitor sees success as soon as their submission is
//! durably stored.

mod create;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/submissions";

/// Configures and returns the Actix scope for the public submission route.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(create::process))
}
