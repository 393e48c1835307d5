//! The fixed spreadsheet row shape.
//!
//! Consumers of the sheet depend on positional columns, so the order below
//! is a compatibility contract: date, time, name, email, consent, then the
//! eight metadata fields, each falling back to the literal "N/A".

use common::model::metadata::display_or_na;
use common::model::submission::Submission;

/// Worksheet tab the sync writes to.
pub const SHEET_NAME: &str = "Submissions";

/// Append target: columns A through M under the header row. The append
/// call adds after the last data row, never overwriting.
pub const APPEND_RANGE: &str = "Submissions!A2:M";

/// Number of columns in the contract.
pub const COLUMN_COUNT: usize = 13;

/// Map one submission onto the 13-column row. Dates are rendered in UTC
/// with a fixed format so the sheet is locale-stable.
pub fn map_row(submission: &Submission) -> Vec<String> {
    let m = &submission.metadata;
    vec![
        submission.created_at.format("%m/%d/%Y").to_string(),
        submission.created_at.format("%H:%M:%S").to_string(),
        submission.full_name.clone(),
        submission.email.clone(),
        if submission.newsletter_opt_in {
            "Yes"
        } else {
            "No"
        }
        .to_string(),
        display_or_na(&m.city),
        display_or_na(&m.region),
        display_or_na(&m.country),
        display_or_na(&m.ip),
        display_or_na(&m.browser),
        display_or_na(&m.device_type),
        display_or_na(&m.screen_resolution),
        display_or_na(&m.timezone),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use common::model::metadata::ClientMetadata;
    use common::model::submission::SubmissionKind;

    use super::*;

    fn submission(metadata: ClientMetadata) -> Submission {
        Submission {
            id: "s1".to_string(),
            kind: SubmissionKind::BeforeYouSign,
            full_name: "Iris Vale".to_string(),
            email: "iris@example.org".to_string(),
            newsletter_opt_in: false,
            metadata,
            created_at: Utc.with_ymd_and_hms(2025, 4, 7, 14, 30, 5).unwrap(),
            synced_at: None,
        }
    }

    #[test]
    fn row_has_thirteen_columns_in_contract_order() {
        let row = map_row(&submission(ClientMetadata {
            city: Some("Miami".to_string()),
            region: Some("FL".to_string()),
            country: Some("United States".to_string()),
            ip: Some("203.0.113.9".to_string()),
            browser: Some("Chrome".to_string()),
            device_type: Some("Desktop".to_string()),
            screen_resolution: Some("1920x1080".to_string()),
            timezone: Some("America/New_York".to_string()),
            ..ClientMetadata::default()
        }));

        assert_eq!(row.len(), COLUMN_COUNT);
        assert_eq!(
            row,
            [
                "04/07/2025",
                "14:30:05",
                "Iris Vale",
                "iris@example.org",
                "No",
                "Miami",
                "FL",
                "United States",
                "203.0.113.9",
                "Chrome",
                "Desktop",
                "1920x1080",
                "America/New_York",
            ]
        );
    }

    #[test]
    fn missing_metadata_fields_map_to_na_in_place() {
        let row = map_row(&submission(ClientMetadata {
            country: Some("Mexico".to_string()),
            ..ClientMetadata::default()
        }));

        assert_eq!(row[5], "N/A"); // city
        assert_eq!(row[6], "N/A"); // region
        assert_eq!(row[7], "Mexico");
        for field in &row[8..] {
            assert_eq!(field, "N/A");
        }
    }

    #[test]
    fn consent_renders_yes_when_opted_in() {
        let mut sub = submission(ClientMetadata::default());
        sub.newsletter_opt_in = true;
        assert_eq!(map_row(&sub)[4], "Yes");
    }
}
