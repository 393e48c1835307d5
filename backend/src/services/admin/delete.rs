use actix_web::{web, HttpResponse, Responder};
use log::info;

use crate::store::Store;

use super::parse_kind;

pub(crate) async fn process(
    store: web::Data<Store>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (kind_raw, id) = path.into_inner();
    let kind = match parse_kind(&kind_raw) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    match store.delete_submission(kind, &id) {
        Ok(true) => {
            info!("admin deleted submission {id} ({kind})");
            HttpResponse::Ok().body("Submission deleted")
        }
        Ok(false) => HttpResponse::NotFound().body("Submission not found"),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error deleting submission: {e}"))
        }
    }
}
