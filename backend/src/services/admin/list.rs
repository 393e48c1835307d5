use actix_web::{web, HttpResponse, Responder};

use crate::store::Store;

use super::parse_kind;

pub(crate) async fn process(store: web::Data<Store>, kind: web::Path<String>) -> impl Responder {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    match store.list_submissions(kind) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error listing submissions: {e}"))
        }
    }
}
