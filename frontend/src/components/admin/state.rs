//! Console state: the active collection, the fetched rows, and the
//! client-side table controls.

use yew::NodeRef;

use common::listing::{self, AdminRow, SortColumn, SortDirection};
use common::model::submission::SubmissionKind;

pub const PAGE_SIZE: usize = 10;

/// A collection the console can display: one of the submission kinds, or
/// the petition signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Kind(SubmissionKind),
    Signatures,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Kind(SubmissionKind::BeforeYouSign),
        Collection::Kind(SubmissionKind::WhereScamsThrive),
        Collection::Kind(SubmissionKind::TimeshareChecklist),
        Collection::Kind(SubmissionKind::ScamReport),
        Collection::Signatures,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Collection::Kind(kind) => kind.title(),
            Collection::Signatures => "Signatures",
        }
    }

    /// Identifier used in export filenames.
    pub fn slug(self) -> &'static str {
        match self {
            Collection::Kind(kind) => kind.as_str(),
            Collection::Signatures => "signatures",
        }
    }

    /// Admin API base path for this collection.
    pub fn endpoint_base(self) -> String {
        match self {
            Collection::Kind(kind) => format!("/api/admin/{kind}"),
            Collection::Signatures => "/api/admin/signatures".to_string(),
        }
    }
}

pub struct AdminConsole {
    pub collection: Collection,
    /// The full fetched row set; everything below is derived from it.
    pub rows: Vec<AdminRow>,
    pub loading: bool,
    pub error: Option<String>,
    pub search: String,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    pub page: usize,
    /// Row shown in the detail panel.
    pub selected: Option<AdminRow>,
    /// What the operator has typed into the delete-all confirmation box.
    pub confirm_text: String,
    pub detail_ref: NodeRef,
}

impl AdminConsole {
    pub fn new() -> Self {
        AdminConsole {
            collection: Collection::Kind(SubmissionKind::BeforeYouSign),
            rows: Vec::new(),
            loading: true,
            error: None,
            search: String::new(),
            sort_column: SortColumn::CreatedAt,
            sort_direction: SortDirection::Descending,
            page: 0,
            selected: None,
            confirm_text: String::new(),
            detail_ref: NodeRef::default(),
        }
    }

    /// Search, sort and slice the current page. Returns the page rows and
    /// the filtered total (for the pager).
    pub fn visible_rows(&self) -> (Vec<AdminRow>, usize) {
        let mut filtered = listing::search(&self.rows, &self.search);
        listing::sort(&mut filtered, self.sort_column, self.sort_direction);
        let total = filtered.len();
        let page = listing::page(&filtered, self.page, PAGE_SIZE).to_vec();
        (page, total)
    }
}
