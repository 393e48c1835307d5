//! Sheets REST client with service-account authentication.
//!
//! Construction only parses the credentials; the OAuth token is fetched
//! lazily on the first API call and cached for the client's lifetime, so a
//! sync run with nothing to export never touches the network. A
//! `SHEETS_ACCESS_TOKEN` environment variable bypasses the JWT grant, which
//! is handy against a local API emulator.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{ServiceAccountKey, SheetsError, SpreadsheetApi};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const ACCESS_TOKEN_ENV: &str = "SHEETS_ACCESS_TOKEN";

pub struct SheetsClient {
    http: reqwest::Client,
    key: ServiceAccountKey,
    spreadsheet_id: String,
    token: Mutex<Option<String>>,
}

#[derive(Debug, Serialize)]
struct GrantClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Serialize)]
struct AppendBody<'a> {
    values: &'a [Vec<String>],
    #[serde(rename = "majorDimension")]
    major_dimension: &'a str,
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
    #[serde(default)]
    updates: Option<AppendUpdates>,
}

#[derive(Debug, Deserialize)]
struct AppendUpdates {
    #[serde(rename = "updatedRows", default)]
    updated_rows: Option<usize>,
}

impl SheetsClient {
    /// Parse the service-account JSON blob. No network traffic happens
    /// here.
    pub fn new(credentials_json: &str, spreadsheet_id: String) -> Result<Self, SheetsError> {
        let key: ServiceAccountKey = serde_json::from_str(credentials_json)
            .map_err(|e| SheetsError::Credentials(format!("invalid service account JSON: {e}")))?;
        debug!(
            "sheets client for spreadsheet {} as {}",
            spreadsheet_id, key.client_email
        );
        Ok(SheetsClient {
            http: reqwest::Client::new(),
            key,
            spreadsheet_id,
            token: Mutex::new(std::env::var(ACCESS_TOKEN_ENV).ok()),
        })
    }

    /// Cached access token, fetched through the signed-JWT grant on first
    /// use.
    async fn access_token(&self) -> Result<String, SheetsError> {
        let mut token = self.token.lock().await;
        if let Some(existing) = token.as_ref() {
            return Ok(existing.clone());
        }

        let now = Utc::now().timestamp();
        let claims = GrantClaims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + 3600,
        };
        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| SheetsError::Credentials(format!("invalid private key: {e}")))?;
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| SheetsError::Credentials(format!("failed to sign token grant: {e}")))?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;
        Self::check_status(&response)?;
        let granted: TokenResponse = response.json().await?;

        *token = Some(granted.access_token.clone());
        Ok(granted.access_token)
    }

    fn check_status(response: &reqwest::Response) -> Result<(), SheetsError> {
        let status = response.status();
        if !status.is_success() {
            warn!("sheets API call returned {status}");
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SpreadsheetApi for SheetsClient {
    async fn sheet_titles(&self) -> Result<Vec<String>, SheetsError> {
        let token = self.access_token().await?;
        let url = format!(
            "{SHEETS_API_BASE}/{}?fields=sheets.properties.title",
            self.spreadsheet_id
        );
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        Self::check_status(&response)?;
        let meta: SpreadsheetMeta = response.json().await?;
        Ok(meta
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect())
    }

    async fn append_rows(&self, range: &str, rows: &[Vec<String>]) -> Result<usize, SheetsError> {
        let token = self.access_token().await?;
        let url = format!(
            "{SHEETS_API_BASE}/{}/values/{range}:append\
             ?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.spreadsheet_id
        );
        let body = AppendBody {
            values: rows,
            major_dimension: "ROWS",
        };
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Self::check_status(&response)?;
        let appended: AppendResponse = response.json().await?;
        Ok(appended
            .updates
            .and_then(|u| u.updated_rows)
            .unwrap_or(rows.len()))
    }
}
