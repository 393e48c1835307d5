//! Signature variants of the admin operations.
//!
//! Same shape as the submission handlers; the list accepts an optional
//! `petition_id` query to scope to one campaign.

use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use log::{info, warn};
use serde::Deserialize;

use common::csv::{export_csv, export_filename};
use common::listing::AdminRow;
use common::requests::{DeleteAllRequest, DeletedResponse, DELETE_ALL_CONFIRMATION};

use crate::store::Store;

#[derive(Debug, Deserialize)]
pub(crate) struct SignatureQuery {
    petition_id: Option<String>,
}

pub(crate) async fn list(
    store: web::Data<Store>,
    query: web::Query<SignatureQuery>,
) -> impl Responder {
    match store.list_signatures(query.petition_id.as_deref()) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error listing signatures: {e}"))
        }
    }
}

pub(crate) async fn delete_one(store: web::Data<Store>, id: web::Path<String>) -> impl Responder {
    match store.delete_signature(&id) {
        Ok(true) => {
            info!("admin deleted signature {id}");
            HttpResponse::Ok().body("Signature deleted")
        }
        Ok(false) => HttpResponse::NotFound().body("Signature not found"),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error deleting signature: {e}"))
        }
    }
}

pub(crate) async fn delete_all(
    store: web::Data<Store>,
    payload: web::Json<DeleteAllRequest>,
) -> impl Responder {
    if payload.confirmation != DELETE_ALL_CONFIRMATION {
        return HttpResponse::BadRequest().body(format!(
            "Type {DELETE_ALL_CONFIRMATION} to confirm deleting every row"
        ));
    }
    match store.delete_all_signatures() {
        Ok(deleted) => {
            warn!("admin deleted ALL {deleted} signatures");
            HttpResponse::Ok().json(DeletedResponse { deleted })
        }
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error deleting signatures: {e}"))
        }
    }
}

pub(crate) async fn export(
    store: web::Data<Store>,
    query: web::Query<SignatureQuery>,
) -> impl Responder {
    match store.list_signatures(query.petition_id.as_deref()) {
        Ok(rows) => {
            let rows: Vec<AdminRow> = rows.into_iter().map(AdminRow::from).collect();
            let filename =
                export_filename("signatures", &Utc::now().format("%Y-%m-%d").to_string());
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(export_csv(&rows))
        }
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error exporting signatures: {e}"))
        }
    }
}
