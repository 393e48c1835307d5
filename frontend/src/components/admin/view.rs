//! View rendering for the admin console: the collection tabs, search box,
//! sortable table, pager, detail panel and the danger zone.

use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use common::listing::{page_count, AdminRow, SortColumn, SortDirection};
use common::model::metadata::{coord_or_na, display_or_na};
use common::requests::DELETE_ALL_CONFIRMATION;

use crate::components::dialog::SlidePanel;

use super::messages::Msg;
use super::state::{AdminConsole, Collection, PAGE_SIZE};

pub fn view(component: &AdminConsole, ctx: &Context<AdminConsole>) -> Html {
    let link = ctx.link();
    let (rows, filtered_total) = component.visible_rows();

    html! {
        <div class="page admin-page">
            <h1>{ "Submissions console" }</h1>
            { tabs(component, link) }
            { toolbar(component, link) }
            {
                if component.loading {
                    html! { <div class="spinner" /> }
                } else if let Some(error) = &component.error {
                    html! { <p class="error">{ error }</p> }
                } else {
                    table(component, link, &rows, filtered_total)
                }
            }
            { detail_panel(component, link) }
            { danger_zone(component, link) }
        </div>
    }
}

fn tabs(component: &AdminConsole, link: &Scope<AdminConsole>) -> Html {
    html! {
        <div class="tab-bar">
            {
                Collection::ALL.iter().map(|collection| {
                    let collection = *collection;
                    let class = if component.collection == collection { "tab active" } else { "tab" };
                    html! {
                        <button
                            class={class}
                            onclick={link.callback(move |_| Msg::Select(collection))}
                        >
                            { collection.label() }
                        </button>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}

fn toolbar(component: &AdminConsole, link: &Scope<AdminConsole>) -> Html {
    let on_search = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target().unwrap().dyn_into().unwrap();
        Msg::SetSearch(input.value())
    });
    html! {
        <div class="toolbar">
            <input
                class="search"
                type="text"
                placeholder="Search name, email or city..."
                value={component.search.clone()}
                oninput={on_search}
            />
            <button class="export" onclick={link.callback(|_| Msg::ExportCsv)}>
                { "Export CSV" }
            </button>
        </div>
    }
}

fn sort_header(
    component: &AdminConsole,
    link: &Scope<AdminConsole>,
    column: SortColumn,
    label: &str,
) -> Html {
    let indicator = if component.sort_column == column {
        match component.sort_direction {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        }
    } else {
        ""
    };
    html! {
        <th onclick={link.callback(move |_| Msg::SortBy(column))}>
            { format!("{label}{indicator}") }
        </th>
    }
}

fn table(
    component: &AdminConsole,
    link: &Scope<AdminConsole>,
    rows: &[AdminRow],
    filtered_total: usize,
) -> Html {
    html! {
        <>
            <table class="admin-table">
                <thead>
                    <tr>
                        { sort_header(component, link, SortColumn::CreatedAt, "Date") }
                        { sort_header(component, link, SortColumn::FullName, "Name") }
                        { sort_header(component, link, SortColumn::Email, "Email") }
                        <th>{ "Newsletter" }</th>
                        <th>{ "City" }</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {
                        rows.iter().map(|row| table_row(link, row)).collect::<Html>()
                    }
                </tbody>
            </table>
            { pager(component, link, filtered_total) }
        </>
    }
}

fn table_row(link: &Scope<AdminConsole>, row: &AdminRow) -> Html {
    let detail = row.clone();
    let delete_id = row.id.clone();
    html! {
        <tr>
            <td>{ row.created_at.format("%Y-%m-%d %H:%M").to_string() }</td>
            <td>{ &row.full_name }</td>
            <td>{ &row.email }</td>
            <td>{ if row.newsletter_opt_in { "Yes" } else { "No" } }</td>
            <td>{ display_or_na(&row.metadata.city) }</td>
            <td class="row-actions">
                <button onclick={link.callback(move |_| Msg::OpenDetail(Box::new(detail.clone())))}>
                    { "View" }
                </button>
                <button
                    class="danger"
                    onclick={link.callback(move |_| Msg::DeleteOne(delete_id.clone()))}
                >
                    { "Delete" }
                </button>
            </td>
        </tr>
    }
}

fn pager(component: &AdminConsole, link: &Scope<AdminConsole>, filtered_total: usize) -> Html {
    let pages = page_count(filtered_total, PAGE_SIZE);
    if pages <= 1 {
        return html! {};
    }
    let current = component.page;
    html! {
        <div class="pager">
            <button
                disabled={current == 0}
                onclick={link.callback(move |_| Msg::SetPage(current.saturating_sub(1)))}
            >
                { "Prev" }
            </button>
            <span>{ format!("Page {} of {pages}", current + 1) }</span>
            <button
                disabled={current + 1 >= pages}
                onclick={link.callback(move |_| Msg::SetPage(current + 1))}
            >
                { "Next" }
            </button>
        </div>
    }
}

fn detail_panel(component: &AdminConsole, link: &Scope<AdminConsole>) -> Html {
    html! {
        <SlidePanel node_ref={component.detail_ref.clone()}>
            {
                if let Some(row) = &component.selected {
                    detail_fields(link, row)
                } else {
                    html! {}
                }
            }
        </SlidePanel>
    }
}

fn detail_field(label: &str, value: String) -> Html {
    html! {
        <div class="detail-field">
            <span class="detail-label">{ label }</span>
            <span class="detail-value">{ value }</span>
        </div>
    }
}

fn detail_fields(link: &Scope<AdminConsole>, row: &AdminRow) -> Html {
    let m = &row.metadata;
    html! {
        <div class="detail-body">
            <h2>{ &row.full_name }</h2>
            { detail_field("Email", row.email.clone()) }
            { detail_field("Submitted", row.created_at.to_rfc3339()) }
            { detail_field(
                "Newsletter",
                if row.newsletter_opt_in { "Yes" } else { "No" }.to_string(),
            ) }
            { detail_field(
                "Synced to sheet",
                match &row.synced_at {
                    Some(at) => at.to_rfc3339(),
                    None => "Not yet".to_string(),
                },
            ) }
            <h3>{ "Client metadata" }</h3>
            { detail_field("Browser", display_or_na(&m.browser)) }
            { detail_field("Device", display_or_na(&m.device_type)) }
            { detail_field("Screen resolution", display_or_na(&m.screen_resolution)) }
            { detail_field("Timezone", display_or_na(&m.timezone)) }
            { detail_field("Language", display_or_na(&m.language)) }
            { detail_field("IP", display_or_na(&m.ip)) }
            { detail_field("City", display_or_na(&m.city)) }
            { detail_field("Region", display_or_na(&m.region)) }
            { detail_field("Country", display_or_na(&m.country)) }
            { detail_field("Latitude", coord_or_na(&m.latitude)) }
            { detail_field("Longitude", coord_or_na(&m.longitude)) }
            <button class="close" onclick={link.callback(|_| Msg::CloseDetail)}>
                { "Close" }
            </button>
        </div>
    }
}

fn danger_zone(component: &AdminConsole, link: &Scope<AdminConsole>) -> Html {
    let on_confirm = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target().unwrap().dyn_into().unwrap();
        Msg::SetConfirmText(input.value())
    });
    let armed = component.confirm_text == DELETE_ALL_CONFIRMATION;
    html! {
        <div class="danger-zone">
            <h3>{ "Danger zone" }</h3>
            <p>
                { format!(
                    "Type {DELETE_ALL_CONFIRMATION} to enable deleting every row in \"{}\".",
                    component.collection.label(),
                ) }
            </p>
            <input
                type="text"
                value={component.confirm_text.clone()}
                oninput={on_confirm}
            />
            <button
                class="danger"
                disabled={!armed}
                onclick={link.callback(|_| Msg::DeleteAll)}
            >
                { "Delete all" }
            </button>
        </div>
    }
}
