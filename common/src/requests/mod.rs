//! Request and response payloads exchanged between frontend and backend.

use serde::{Deserialize, Serialize};

use crate::model::metadata::ClientMetadata;
use crate::model::submission::SubmissionKind;

/// Payload of a public form submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubmission {
    pub kind: SubmissionKind,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub newsletter_opt_in: bool,
    #[serde(default)]
    pub metadata: ClientMetadata,
}

/// Payload of a petition signature submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignPetition {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub newsletter_opt_in: bool,
    #[serde(default)]
    pub metadata: ClientMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionAccepted {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureAccepted {
    pub id: String,
    /// Live count after this signature landed.
    pub signature_count: i64,
}

/// The literal token an operator must type (and the client must echo)
/// before a bulk delete is accepted.
pub const DELETE_ALL_CONFIRMATION: &str = "DELETE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAllRequest {
    pub confirmation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: usize,
}

/// Success body of the spreadsheet sync endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub message: String,
    pub details: SyncDetails,
}

/// Wire contract of the sync summary details: camelCase field names,
/// spreadsheet identity present only when the spreadsheet was reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncDetails {
    pub total_submissions: usize,
    pub synced_rows: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spreadsheet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
}

/// Error body returned with a 500 from the sync endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncError {
    pub error: String,
    pub details: String,
}

/// Non-secret configuration exposed to the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recaptcha_site_key: Option<String>,
}
