//! Client-side table helpers for the admin console.
//!
//! The admin screens fetch the full row set for a collection and then
//! search, sort and paginate it locally. Those three steps live here, on a
//! view row shared by submissions and petition signatures, so the same
//! table component serves every collection and the logic is covered by
//! native tests instead of living inside the WASM component.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::metadata::ClientMetadata;
use crate::model::petition::Signature;
use crate::model::submission::Submission;

/// One row as the admin table displays it, regardless of which collection
/// it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminRow {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub newsletter_opt_in: bool,
    #[serde(default)]
    pub metadata: ClientMetadata,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<DateTime<Utc>>,
}

impl From<Submission> for AdminRow {
    fn from(s: Submission) -> Self {
        AdminRow {
            id: s.id,
            full_name: s.full_name,
            email: s.email,
            newsletter_opt_in: s.newsletter_opt_in,
            metadata: s.metadata,
            created_at: s.created_at,
            synced_at: s.synced_at,
        }
    }
}

impl From<Signature> for AdminRow {
    fn from(s: Signature) -> Self {
        AdminRow {
            id: s.id,
            full_name: s.full_name,
            email: s.email,
            newsletter_opt_in: s.newsletter_opt_in,
            metadata: s.metadata,
            created_at: s.created_at,
            synced_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    CreatedAt,
    FullName,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Case-insensitive free-text filter over name, email and city.
pub fn search(rows: &[AdminRow], needle: &str) -> Vec<AdminRow> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| {
            row.full_name.to_lowercase().contains(&needle)
                || row.email.to_lowercase().contains(&needle)
                || row
                    .metadata
                    .city
                    .as_deref()
                    .map(|c| c.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// In-place sort by the selected column and direction.
pub fn sort(rows: &mut [AdminRow], column: SortColumn, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = match column {
            SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
            SortColumn::FullName => a.full_name.to_lowercase().cmp(&b.full_name.to_lowercase()),
            SortColumn::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Slice out one page for table display. An out-of-range page yields an
/// empty slice rather than panicking.
pub fn page(rows: &[AdminRow], page: usize, page_size: usize) -> &[AdminRow] {
    let start = page.saturating_mul(page_size);
    if start >= rows.len() || page_size == 0 {
        return &[];
    }
    let end = (start + page_size).min(rows.len());
    &rows[start..end]
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn row(name: &str, email: &str, city: Option<&str>, minute: u32) -> AdminRow {
        AdminRow {
            id: format!("id-{name}"),
            full_name: name.to_string(),
            email: email.to_string(),
            newsletter_opt_in: false,
            metadata: ClientMetadata {
                city: city.map(str::to_string),
                ..ClientMetadata::default()
            },
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, minute, 0).unwrap(),
            synced_at: None,
        }
    }

    #[test]
    fn search_matches_name_email_and_city_case_insensitively() {
        let rows = vec![
            row("Alice Soto", "alice@example.org", Some("Cancun"), 0),
            row("Bob Marsh", "bob@example.org", None, 1),
            row("Carol Finch", "carol@scamwatch.org", Some("Tulsa"), 2),
        ];

        assert_eq!(search(&rows, "ALICE").len(), 1);
        assert_eq!(search(&rows, "example.org").len(), 2);
        assert_eq!(search(&rows, "cancun").len(), 1);
        assert_eq!(search(&rows, "").len(), 3);
        assert_eq!(search(&rows, "zurich").len(), 0);
    }

    #[test]
    fn sort_orders_by_column_and_direction() {
        let mut rows = vec![
            row("bob", "b@x.org", None, 2),
            row("Alice", "a@x.org", None, 0),
            row("carol", "c@x.org", None, 1),
        ];

        sort(&mut rows, SortColumn::FullName, SortDirection::Ascending);
        assert_eq!(rows[0].full_name, "Alice");
        assert_eq!(rows[2].full_name, "carol");

        sort(&mut rows, SortColumn::CreatedAt, SortDirection::Descending);
        assert_eq!(rows[0].full_name, "bob");
    }

    #[test]
    fn pagination_slices_without_panicking() {
        let rows: Vec<AdminRow> = (0..5)
            .map(|i| row(&format!("p{i}"), "p@x.org", None, i))
            .collect();

        assert_eq!(page(&rows, 0, 2).len(), 2);
        assert_eq!(page(&rows, 2, 2).len(), 1);
        assert_eq!(page(&rows, 3, 2).len(), 0);
        assert_eq!(page(&rows, 0, 0).len(), 0);
        assert_eq!(page_count(5, 2), 3);
        assert_eq!(page_count(0, 2), 0);
    }
}
