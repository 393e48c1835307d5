//! Update function for the admin console.

use yew::platform::spawn_local;
use yew::prelude::*;

use common::csv::{export_csv, export_filename};
use common::requests::DELETE_ALL_CONFIRMATION;

use crate::api;
use crate::components::dialog::{close_panel, open_panel};
use crate::helpers::{download_text_file, show_toast, today_string};

use super::messages::Msg;
use super::state::{AdminConsole, Collection};

pub fn update(component: &mut AdminConsole, ctx: &Context<AdminConsole>, msg: Msg) -> bool {
    match msg {
        Msg::Select(collection) => {
            if component.collection != collection {
                component.collection = collection;
                component.rows.clear();
                component.search.clear();
                component.page = 0;
                component.selected = None;
                component.confirm_text.clear();
                ctx.link().send_message(Msg::Load);
            }
            true
        }
        Msg::Load => {
            component.loading = true;
            component.error = None;
            let collection = component.collection;
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = match collection {
                    Collection::Kind(kind) => api::fetch_submission_rows(kind).await,
                    Collection::Signatures => api::fetch_signature_rows().await,
                };
                link.send_message(Msg::Loaded(result));
            });
            true
        }
        Msg::Loaded(result) => {
            component.loading = false;
            match result {
                Ok(rows) => {
                    component.rows = rows;
                    component.page = 0;
                }
                Err(e) => component.error = Some(e),
            }
            true
        }
        Msg::SetSearch(value) => {
            component.search = value;
            component.page = 0;
            true
        }
        Msg::SortBy(column) => {
            if component.sort_column == column {
                component.sort_direction = component.sort_direction.toggled();
            } else {
                component.sort_column = column;
            }
            true
        }
        Msg::SetPage(page) => {
            component.page = page;
            true
        }
        Msg::OpenDetail(row) => {
            component.selected = Some(*row);
            open_panel(&component.detail_ref);
            true
        }
        Msg::CloseDetail => {
            component.selected = None;
            close_panel(&component.detail_ref);
            true
        }
        Msg::DeleteOne(id) => {
            let endpoint = component.collection.endpoint_base();
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::Deleted(api::delete_row(&endpoint, &id).await));
            });
            false
        }
        Msg::Deleted(result) => {
            match result {
                Ok(()) => {
                    show_toast("Row deleted", false);
                    component.selected = None;
                    close_panel(&component.detail_ref);
                    ctx.link().send_message(Msg::Load);
                }
                Err(e) => show_toast(&format!("Delete failed: {e}"), true),
            }
            true
        }
        Msg::SetConfirmText(value) => {
            component.confirm_text = value;
            true
        }
        Msg::DeleteAll => {
            // The button is disabled until the token matches, but check
            // again before firing.
            if component.confirm_text != DELETE_ALL_CONFIRMATION {
                return false;
            }
            let endpoint = component.collection.endpoint_base();
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::DeletedAll(api::delete_all(&endpoint).await));
            });
            false
        }
        Msg::DeletedAll(result) => {
            match result {
                Ok(deleted) => {
                    show_toast(&format!("Deleted {deleted} rows"), false);
                    component.confirm_text.clear();
                    ctx.link().send_message(Msg::Load);
                }
                Err(e) => show_toast(&format!("Delete all failed: {e}"), true),
            }
            true
        }
        Msg::ExportCsv => {
            // Export covers the full loaded row set, not just the visible
            // page.
            let document = export_csv(&component.rows);
            let filename = export_filename(component.collection.slug(), &today_string());
            download_text_file(&filename, &document, "text/csv");
            false
        }
    }
}
