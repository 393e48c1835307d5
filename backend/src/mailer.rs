//! Email/CRM client (Brevo REST API).
//!
//! Used exclusively by the outbox worker: newsletter contact creation,
//! confirmation emails to submitters, and admin notification emails. Every
//! call is best-effort from the site's point of view; delivery failures are
//! the worker's problem, never the form's.

use log::debug;
use serde::Serialize;
use thiserror::Error;

const BREVO_API_BASE: &str = "https://api.brevo.com/v3";

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mailer API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub struct Mailer {
    http: reqwest::Client,
    api_key: String,
    sender_email: String,
}

#[derive(Debug, Serialize)]
struct ContactBody<'a> {
    email: &'a str,
    attributes: ContactAttributes<'a>,
    #[serde(rename = "updateEnabled")]
    update_enabled: bool,
}

#[derive(Debug, Serialize)]
struct ContactAttributes<'a> {
    #[serde(rename = "FIRSTNAME")]
    first_name: &'a str,
}

#[derive(Debug, Serialize)]
struct EmailBody<'a> {
    sender: Address<'a>,
    to: Vec<Address<'a>>,
    subject: &'a str,
    #[serde(rename = "htmlContent")]
    html_content: &'a str,
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl Mailer {
    pub fn new(api_key: String, sender_email: String) -> Self {
        Mailer {
            http: reqwest::Client::new(),
            api_key,
            sender_email,
        }
    }

    fn check_status(response: &reqwest::Response) -> Result<(), MailerError> {
        let status = response.status();
        if !status.is_success() {
            return Err(MailerError::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }
        Ok(())
    }

    /// Create (or update) a newsletter contact.
    pub async fn add_contact(&self, email: &str, full_name: &str) -> Result<(), MailerError> {
        let body = ContactBody {
            email,
            attributes: ContactAttributes {
                first_name: full_name,
            },
            update_enabled: true,
        };
        let response = self
            .http
            .post(format!("{BREVO_API_BASE}/contacts"))
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        Self::check_status(&response)?;
        debug!("newsletter contact stored for {email}");
        Ok(())
    }

    /// Send one transactional email.
    pub async fn send_email(
        &self,
        to_email: &str,
        to_name: Option<&str>,
        subject: &str,
        html_content: &str,
    ) -> Result<(), MailerError> {
        let body = EmailBody {
            sender: Address {
                email: &self.sender_email,
                name: Some("Advocacy Team"),
            },
            to: vec![Address {
                email: to_email,
                name: to_name,
            }],
            subject,
            html_content,
        };
        let response = self
            .http
            .post(format!("{BREVO_API_BASE}/smtp/email"))
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        Self::check_status(&response)?;
        debug!("transactional email sent to {to_email}");
        Ok(())
    }
}
