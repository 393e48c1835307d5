//! Top-level application component and hash routing.
//!
//! Pages are addressed by `location.hash` (`#scam_report`, `#petition`,
//! `#admin`, ...); the component re-renders on `hashchange`, so plain
//! anchors navigate without reloading.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::{html, Component, Context, Html};

use common::model::submission::SubmissionKind;

use crate::components::admin::AdminConsole;
use crate::components::home::Home;
use crate::components::petition_page::PetitionPage;
use crate::components::submission_form::SubmissionForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Form(SubmissionKind),
    Petition,
    Admin,
}

fn current_route() -> Route {
    let hash = web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    match hash.trim_start_matches('#') {
        "petition" => Route::Petition,
        "admin" => Route::Admin,
        other => match SubmissionKind::parse(other) {
            Some(kind) => Route::Form(kind),
            None => Route::Home,
        },
    }
}

pub struct App {
    route: Route,
}

pub enum Msg {
    RouteChanged(Route),
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            route: current_route(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Msg) -> bool {
        match msg {
            Msg::RouteChanged(route) => {
                if self.route != route {
                    self.route = route;
                    return true;
                }
                false
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let link = ctx.link().clone();
        let on_hash_change = Closure::<dyn FnMut()>::new(move || {
            link.send_message(Msg::RouteChanged(current_route()));
        });
        if let Some(window) = web_sys::window() {
            window.set_onhashchange(Some(on_hash_change.as_ref().unchecked_ref()));
        }
        // The handler must outlive this component; leak it on purpose.
        on_hash_change.forget();
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="site-root">
                { nav_bar() }
                <main>
                    {
                        match self.route {
                            Route::Home => html! { <Home /> },
                            Route::Form(kind) => html! {
                                <div class="page form-page">
                                    <SubmissionForm kind={kind} />
                                </div>
                            },
                            Route::Petition => html! { <PetitionPage /> },
                            Route::Admin => html! { <AdminConsole /> },
                        }
                    }
                </main>
                { footer() }
            </div>
        }
    }
}

fn nav_bar() -> Html {
    html! {
        <nav class="top-nav">
            <a class="brand" href="#">{ "Timeshare Truth Project" }</a>
            <div class="nav-links">
                <a href="#before_you_sign">{ "Before You Sign" }</a>
                <a href="#where_scams_thrive">{ "Where Scams Thrive" }</a>
                <a href="#timeshare_checklist">{ "Checklist" }</a>
                <a href="#scam_report">{ "Report a Scam" }</a>
                <a href="#petition">{ "Petition" }</a>
            </div>
        </nav>
    }
}

fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <p>{ "Timeshare Truth Project — a nonprofit advocating for timeshare scam victims." }</p>
        </footer>
    }
}
