use actix_web::{web, HttpResponse, Responder};
use log::warn;

use common::requests::{DeleteAllRequest, DeletedResponse, DELETE_ALL_CONFIRMATION};

use crate::store::Store;

use super::parse_kind;

/// The one named remove-everything operation. The confirmation token the
/// operator types in the console is checked again here, so a stray request
/// without it cannot wipe a table.
pub(crate) async fn process(
    store: web::Data<Store>,
    kind: web::Path<String>,
    payload: web::Json<DeleteAllRequest>,
) -> impl Responder {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    if payload.confirmation != DELETE_ALL_CONFIRMATION {
        return HttpResponse::BadRequest().body(format!(
            "Type {DELETE_ALL_CONFIRMATION} to confirm deleting every row"
        ));
    }
    match store.delete_all_submissions(kind) {
        Ok(deleted) => {
            warn!("admin deleted ALL {deleted} rows of kind {kind}");
            HttpResponse::Ok().json(DeletedResponse { deleted })
        }
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error deleting submissions: {e}"))
        }
    }
}
