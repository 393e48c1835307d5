//! CSV export builder.
//!
//! One canonical builder shared by the browser-side export (Blob download)
//! and the backend export endpoint, so both produce the same file: a header
//! row followed by data rows, every field quote-wrapped with embedded
//! double quotes doubled.

use crate::listing::AdminRow;
use crate::model::metadata::display_or_na;

/// Column order of the admin export file.
pub const EXPORT_HEADER: [&str; 13] = [
    "Date",
    "Name",
    "Email",
    "Newsletter",
    "Browser",
    "Device",
    "Screen Resolution",
    "Timezone",
    "Language",
    "City",
    "Region",
    "Country",
    "IP",
];

/// Quote-wrap a single field, doubling any embedded double quotes.
pub fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

pub fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Assemble a complete CSV document from a header and data rows.
pub fn build_csv(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str(
        &header
            .iter()
            .map(|h| csv_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    out.push_str("\r\n");
    for row in rows {
        out.push_str(&csv_line(row));
        out.push_str("\r\n");
    }
    out
}

/// Map one admin row onto the export columns.
pub fn export_fields(row: &AdminRow) -> Vec<String> {
    let m = &row.metadata;
    vec![
        row.created_at.to_rfc3339(),
        row.full_name.clone(),
        row.email.clone(),
        if row.newsletter_opt_in { "Yes" } else { "No" }.to_string(),
        display_or_na(&m.browser),
        display_or_na(&m.device_type),
        display_or_na(&m.screen_resolution),
        display_or_na(&m.timezone),
        display_or_na(&m.language),
        display_or_na(&m.city),
        display_or_na(&m.region),
        display_or_na(&m.country),
        display_or_na(&m.ip),
    ]
}

/// The full export document for a row set.
pub fn export_csv(rows: &[AdminRow]) -> String {
    let mapped: Vec<Vec<String>> = rows.iter().map(export_fields).collect();
    build_csv(&EXPORT_HEADER, &mapped)
}

/// Export filename, suffixed with the current date ("YYYY-MM-DD").
pub fn export_filename(collection: &str, date: &str) -> String {
    format!("{collection}-export-{date}.csv")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::model::metadata::ClientMetadata;

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(csv_field(r#"say "no""#), r#""say ""no""""#);
        assert_eq!(csv_field("plain"), "\"plain\"");
    }

    #[test]
    fn every_row_appears_exactly_once() {
        let rows = vec![
            vec!["a".to_string(), "1".to_string()],
            vec!["b".to_string(), "2".to_string()],
        ];
        let csv = build_csv(&["col", "n"], &rows);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "\"col\",\"n\"");
        assert_eq!(lines[1], "\"a\",\"1\"");
        assert_eq!(lines[2], "\"b\",\"2\"");
    }

    #[test]
    fn export_fields_fall_back_to_na() {
        let row = AdminRow {
            id: "s1".to_string(),
            full_name: "Dana Reyes".to_string(),
            email: "dana@example.org".to_string(),
            newsletter_opt_in: true,
            metadata: ClientMetadata::default(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            synced_at: None,
        };
        let fields = export_fields(&row);
        assert_eq!(fields.len(), EXPORT_HEADER.len());
        assert_eq!(fields[3], "Yes");
        // All metadata positions default to the literal "N/A".
        for field in &fields[4..] {
            assert_eq!(field, "N/A");
        }
    }

    #[test]
    fn filename_carries_the_date_suffix() {
        assert_eq!(
            export_filename("scam_report", "2025-06-01"),
            "scam_report-export-2025-06-01.csv"
        );
    }
}
