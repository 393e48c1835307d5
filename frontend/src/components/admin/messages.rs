use common::listing::{AdminRow, SortColumn};

use super::state::Collection;

pub enum Msg {
    /// Switch to another collection and re-fetch.
    Select(Collection),
    /// Fetch the full row set for the active collection.
    Load,
    Loaded(Result<Vec<AdminRow>, String>),
    SetSearch(String),
    /// Sort by a column; a second click on the same column flips the
    /// direction.
    SortBy(SortColumn),
    SetPage(usize),
    OpenDetail(Box<AdminRow>),
    CloseDetail,
    DeleteOne(String),
    Deleted(Result<(), String>),
    SetConfirmText(String),
    DeleteAll,
    DeletedAll(Result<usize, String>),
    ExportCsv,
}
