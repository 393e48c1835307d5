//! Administrative console API.
//!
//! One generic set of handlers serves every submission kind: full list
//! (creation-descending; search, sort and pagination happen client-side
//! over this list), single-row detail, delete-one, the named delete-all
//! operation, and CSV export. Petition signatures get the same operations
//! under their own literal path.
//!
//! `delete_all` is deliberately a single audited operation: the request
//! must carry the literal confirmation token, and the store writes an
//! audit entry in the same transaction as the delete.

mod delete;
mod delete_all;
mod export;
mod get;
mod list;
mod signatures;

use actix_web::web::{delete, get, post, scope};
use actix_web::{HttpResponse, Scope};

use common::model::submission::SubmissionKind;

const API_PATH: &str = "/api/admin";

/// Configures and returns the Actix scope for the admin routes. The
/// literal `signatures` segment is registered before the `{kind}` matcher.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/signatures", get().to(signatures::list))
        .route("/signatures/export", get().to(signatures::export))
        .route("/signatures/delete_all", post().to(signatures::delete_all))
        .route("/signatures/{id}", delete().to(signatures::delete_one))
        .route("/{kind}", get().to(list::process))
        .route("/{kind}/export", get().to(export::process))
        .route("/{kind}/delete_all", post().to(delete_all::process))
        .route("/{kind}/{id}", get().to(get::process))
        .route("/{kind}/{id}", delete().to(delete::process))
}

/// Resolve a path segment to a submission kind, or the 404 the handlers
/// return for unknown collections.
fn parse_kind(raw: &str) -> Result<SubmissionKind, HttpResponse> {
    SubmissionKind::parse(raw)
        .ok_or_else(|| HttpResponse::NotFound().body(format!("Unknown submission kind '{raw}'")))
}
