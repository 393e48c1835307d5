use actix_web::{web, HttpResponse, Responder};

use crate::store::Store;

pub(crate) async fn process(store: web::Data<Store>) -> impl Responder {
    match store.list_petitions() {
        Ok(petitions) => HttpResponse::Ok().json(petitions),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error listing petitions: {e}"))
        }
    }
}
