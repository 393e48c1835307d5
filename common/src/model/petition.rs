use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::metadata::ClientMetadata;

/// An advocacy campaign people can endorse.
///
/// `signature_count` is served from the live count query; the stored
/// counter column is only a cache refreshed whenever a signature lands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Petition {
    pub id: String,
    pub title: String,
    pub story: String,
    pub goal: i64,
    pub signature_count: i64,
    pub created_at: DateTime<Utc>,
}

/// One person's endorsement of a petition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub id: String,
    pub petition_id: String,
    pub full_name: String,
    pub email: String,
    pub newsletter_opt_in: bool,
    #[serde(default)]
    pub metadata: ClientMetadata,
    pub created_at: DateTime<Utc>,
}
