use actix_web::{web, HttpResponse, Responder};

use crate::store::Store;

pub(crate) async fn process(
    store: web::Data<Store>,
    petition_id: web::Path<String>,
) -> impl Responder {
    match store.get_petition(&petition_id) {
        Ok(Some(petition)) => HttpResponse::Ok().json(petition),
        Ok(None) => HttpResponse::NotFound().body("Petition not found"),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error retrieving petition: {e}"))
        }
    }
}
