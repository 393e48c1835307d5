//! Non-secret configuration exposed to the browser.

use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Responder, Scope};

use common::requests::PublicConfig;

use crate::config::Config;

const API_PATH: &str = "/api/config";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(process))
}

pub(crate) async fn process(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(PublicConfig {
        recaptcha_site_key: config.recaptcha_site_key.clone(),
    })
}
