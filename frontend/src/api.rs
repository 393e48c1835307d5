//! Backend fetch helpers.
//!
//! Thin wrappers over `gloo_net` that decode JSON bodies and flatten every
//! failure into a displayable `String`.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;

use common::listing::AdminRow;
use common::model::petition::{Petition, Signature};
use common::model::submission::{Submission, SubmissionKind};
use common::requests::{
    DeleteAllRequest, DeletedResponse, NewSubmission, PublicConfig, SignPetition,
    SignatureAccepted, SubmissionAccepted, DELETE_ALL_CONFIRMATION,
};

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url).send().await.map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(response.text().await.unwrap_or_else(|_| {
            format!("Request to {url} failed with status {}", response.status())
        }));
    }
    response.json::<T>().await.map_err(|e| e.to_string())
}

async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, String> {
    let response = Request::post(url)
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(response.text().await.unwrap_or_else(|_| {
            format!("Request to {url} failed with status {}", response.status())
        }));
    }
    response.json::<T>().await.map_err(|e| e.to_string())
}

pub async fn submit_form(request: &NewSubmission) -> Result<SubmissionAccepted, String> {
    post_json("/api/submissions", request).await
}

pub async fn fetch_petitions() -> Result<Vec<Petition>, String> {
    get_json("/api/petitions").await
}

pub async fn sign_petition(
    petition_id: &str,
    request: &SignPetition,
) -> Result<SignatureAccepted, String> {
    post_json(&format!("/api/petitions/{petition_id}/sign"), request).await
}

pub async fn fetch_public_config() -> Result<PublicConfig, String> {
    get_json("/api/config").await
}

/// Admin list for a submission kind, already shaped for the table.
pub async fn fetch_submission_rows(kind: SubmissionKind) -> Result<Vec<AdminRow>, String> {
    let rows: Vec<Submission> = get_json(&format!("/api/admin/{kind}")).await?;
    Ok(rows.into_iter().map(AdminRow::from).collect())
}

/// Admin list of petition signatures, same table shape.
pub async fn fetch_signature_rows() -> Result<Vec<AdminRow>, String> {
    let rows: Vec<Signature> = get_json("/api/admin/signatures").await?;
    Ok(rows.into_iter().map(AdminRow::from).collect())
}

/// Delete one row under an admin endpoint base such as
/// `/api/admin/scam_report`.
pub async fn delete_row(endpoint_base: &str, id: &str) -> Result<(), String> {
    let url = format!("{endpoint_base}/{id}");
    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(response
            .text()
            .await
            .unwrap_or_else(|_| format!("Delete failed with status {}", response.status())));
    }
    Ok(())
}

/// The named delete-everything operation; the server re-checks the token.
pub async fn delete_all(endpoint_base: &str) -> Result<usize, String> {
    let body = DeleteAllRequest {
        confirmation: DELETE_ALL_CONFIRMATION.to_string(),
    };
    let deleted: DeletedResponse = post_json(&format!("{endpoint_base}/delete_all"), &body).await?;
    Ok(deleted.deleted)
}
