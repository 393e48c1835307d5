//! Submission-to-spreadsheet synchronization endpoint.
//!
//! `POST /api/sync/sheets` exports every submission whose sync marker is
//! still null to the fixed worksheet of the configured Google spreadsheet,
//! then stamps the marker on exactly those rows. The same flow is invoked
//! best-effort by the outbox worker after each form submit.

mod rows;
mod run;

pub(crate) use run::run_pipeline;
pub use run::SyncGuard;

use actix_web::web::{post, resource, route, scope};
use actix_web::{HttpResponse, Scope};

const API_PATH: &str = "/api/sync";

/// Configures and returns the Actix scope for the sync routes. Only POST
/// is accepted; every other method on the path answers 405 instead of
/// falling through to the static-file handler.
pub fn configure_routes() -> Scope {
    scope(API_PATH).service(
        resource("/sheets")
            .route(post().to(run::process))
            .default_service(route().to(method_not_allowed)),
    )
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().body("Use POST")
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};

    use crate::store::Store;

    use super::*;

    #[actix_web::test]
    async fn non_post_methods_get_a_405() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("test.sqlite").to_string_lossy().to_string());
        store.init().unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .app_data(web::Data::new(SyncGuard::default()))
                .service(configure_routes()),
        )
        .await;

        let request = test::TestRequest::get().uri("/api/sync/sheets").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), 405);
    }
}
