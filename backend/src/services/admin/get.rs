use actix_web::{web, HttpResponse, Responder};

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
    match store.get_submission(kind, &id) {
        Ok(Some(submission)) => HttpResponse::Ok().json(submission),
        Ok(None) => HttpResponse::NotFound().body("Submission not found"),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error retrieving submission: {e}"))
        }
    }
}
