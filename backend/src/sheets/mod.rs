//! Google Sheets integration.
//!
//! `SpreadsheetApi` is the seam the sync flow is written against; the real
//! `SheetsClient` talks to the Sheets REST API with a service-account
//! token, and tests substitute an in-memory fake.

mod client;

pub use client::SheetsClient;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Credentials error: {0}")]
    Credentials(String),
}

/// Service-account key, parsed from the `GOOGLE_SERVICE_ACCOUNT_JSON`
/// blob. Only the fields the token grant needs are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// The subset of the Sheets API the sync flow uses.
#[async_trait]
pub trait SpreadsheetApi {
    /// Titles of every sheet tab in the spreadsheet.
    async fn sheet_titles(&self) -> Result<Vec<String>, SheetsError>;

    /// Append rows after the last data row of `range`, letting the service
    /// detect value types. Returns the number of rows written.
    async fn append_rows(&self, range: &str, rows: &[Vec<String>]) -> Result<usize, SheetsError>;
}
