use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::metadata::ClientMetadata;

/// The public form a submission came from.
///
/// All four forms capture the same record shape, so they share one table
/// with this discriminator instead of four structurally identical tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    BeforeYouSign,
    WhereScamsThrive,
    TimeshareChecklist,
    ScamReport,
}

impl SubmissionKind {
    pub const ALL: [SubmissionKind; 4] = [
        SubmissionKind::BeforeYouSign,
        SubmissionKind::WhereScamsThrive,
        SubmissionKind::TimeshareChecklist,
        SubmissionKind::ScamReport,
    ];

    /// Stable snake_case identifier used in URLs and the database.
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionKind::BeforeYouSign => "before_you_sign",
            SubmissionKind::WhereScamsThrive => "where_scams_thrive",
            SubmissionKind::TimeshareChecklist => "timeshare_checklist",
            SubmissionKind::ScamReport => "scam_report",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }

    /// Human-readable name for headings and exports.
    pub fn title(self) -> &'static str {
        match self {
            SubmissionKind::BeforeYouSign => "Before You Sign",
            SubmissionKind::WhereScamsThrive => "Where Scams Thrive",
            SubmissionKind::TimeshareChecklist => "Timeshare Checklist",
            SubmissionKind::ScamReport => "Scam Report",
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted record of a public form fill-out.
///
/// Immutable once created, except for `synced_at` being set exactly once by
/// the spreadsheet sync flow and full deletion by an administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub kind: SubmissionKind,
    pub full_name: String,
    pub email: String,
    pub newsletter_opt_in: bool,
    #[serde(default)]
    pub metadata: ClientMetadata,
    pub created_at: DateTime<Utc>,
    /// Null until the row has been exported to the spreadsheet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_identifiers_round_trip() {
        for kind in SubmissionKind::ALL {
            assert_eq!(SubmissionKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(SubmissionKind::parse("newsletter"), None);
    }
}
