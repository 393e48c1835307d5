mod config;
mod mailer;
mod outbox;
mod services;
mod sheets;
mod store;

use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::info;
use mime_guess::from_path;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::outbox::OutboxState;
use crate::services::sync::SyncGuard;
use crate::store::Store;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serve the embedded frontend bundle, falling back to index.html so the
/// hash-routed pages load on a direct visit.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let host = "0.0.0.0";
    let port = config.port;

    let store = Store::new(config.db_path.clone());
    store
        .init()
        .map_err(|e| io::Error::other(format!("database init failed: {e}")))?;

    // Outbox worker: nudged by form handlers, self-waking on an interval
    // to retry earlier failures.
    let (tx, rx) = mpsc::channel(100);
    let outbox_state = OutboxState::new(tx);
    let sync_guard = Arc::new(SyncGuard::default());

    {
        let worker_store = store.clone();
        let worker_config = config.clone();
        let worker_guard = sync_guard.clone();
        tokio::spawn(async move {
            outbox::worker::run(worker_store, worker_config, worker_guard, rx).await;
        });
    }

    info!("Server running at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(1024 * 1024)) // 1 MB
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(outbox_state.clone()))
            .app_data(web::Data::from(sync_guard.clone()))
            .service(services::submissions::configure_routes())
            .service(services::petitions::configure_routes())
            .service(services::admin::configure_routes())
            .service(services::sync::configure_routes())
            .service(services::config::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
    .bind((host, port))?
    .run()
    .await
}
