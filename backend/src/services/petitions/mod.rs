//! Petition endpoints.
//!
//! - `GET /api/petitions`: all petitions, newest first.
//! - `GET /api/petitions/{petition_id}`: one petition.
//! - `POST /api/petitions/{petition_id}/sign`: record a signature.
//!
//! Signature totals are always the live count over the signatures table;
//! the cached counter column is refreshed on write and never served on its
//! own.

mod get;
mod list;
mod sign;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/petitions";

/// Configures and returns the Actix scope for petition routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/{petition_id}", get().to(get::process))
        .route("/{petition_id}/sign", post().to(sign::process))
}
