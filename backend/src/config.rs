//! Server configuration, read from environment variables.
//!
//! Every value is consumed as an opaque string; the only validation anywhere
//! is a presence check. Secrets that only the sync endpoint needs
//! (`GOOGLE_SERVICE_ACCOUNT_JSON`, `SHEETS_SPREADSHEET_ID`) are checked at
//! invocation time by that endpoint, not at startup, so a misconfigured
//! sync keeps the rest of the site serving.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite database file.
    pub db_path: String,

    /// API key for the email/CRM service. Absent means every outbox
    /// delivery attempt fails and gets logged, never that a form submit
    /// fails.
    pub brevo_api_key: Option<String>,

    /// From-address for transactional email.
    pub sender_email: String,

    /// Recipient of admin notification emails.
    pub admin_notify_email: Option<String>,

    /// Recaptcha site key handed to the browser as-is.
    pub recaptcha_site_key: Option<String>,

    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            db_path: env::var("ADVOCACY_DB_PATH").unwrap_or_else(|_| "advocacy.sqlite".to_string()),
            brevo_api_key: non_blank(env::var("BREVO_API_KEY").ok()),
            sender_email: env::var("SENDER_EMAIL")
                .unwrap_or_else(|_| "no-reply@advocacy.org".to_string()),
            admin_notify_email: non_blank(env::var("ADMIN_NOTIFY_EMAIL").ok()),
            recaptcha_site_key: non_blank(env::var("RECAPTCHA_SITE_KEY").ok()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Fetch a required environment variable, failing with a message that names
/// exactly the missing variable.
pub fn required_env(name: &str) -> Result<String, String> {
    required(name, env::var(name).ok())
}

pub(crate) fn required(name: &str, value: Option<String>) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(format!("Missing required environment variable: {name}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_is_named_in_the_error() {
        let err = required("SHEETS_SPREADSHEET_ID", None).unwrap_err();
        assert_eq!(
            err,
            "Missing required environment variable: SHEETS_SPREADSHEET_ID"
        );

        let err = required("GOOGLE_SERVICE_ACCOUNT_JSON", Some("  ".to_string())).unwrap_err();
        assert!(err.contains("GOOGLE_SERVICE_ACCOUNT_JSON"));
    }

    #[test]
    fn present_variable_passes_through() {
        assert_eq!(
            required("SHEETS_SPREADSHEET_ID", Some("abc123".to_string())),
            Ok("abc123".to_string())
        );
    }
}
