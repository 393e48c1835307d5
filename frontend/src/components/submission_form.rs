//! Lead-capture form, one component for all four kinds.
//!
//! Metadata is gathered once when the component mounts; submitting runs
//! the required-field check, disables the button, and POSTs to the
//! backend. The visitor sees success as soon as the backend stored the
//! record — follow-up emails are the server's business.

use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::metadata::ClientMetadata;
use common::model::submission::SubmissionKind;
use common::requests::NewSubmission;

use crate::api;
use crate::helpers::show_toast;
use crate::metadata;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub kind: SubmissionKind,
}

pub struct SubmissionForm {
    full_name: String,
    email: String,
    newsletter_opt_in: bool,
    metadata: Option<ClientMetadata>,
    recaptcha_site_key: Option<String>,
    submitting: bool,
    submitted: bool,
}

pub enum Msg {
    SetName(String),
    SetEmail(String),
    ToggleOptIn,
    MetadataReady(Box<ClientMetadata>),
    ConfigReady(Option<String>),
    Submit,
    Accepted,
    Failed(String),
}

impl Component for SubmissionForm {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            newsletter_opt_in: true,
            metadata: None,
            recaptcha_site_key: None,
            submitting: false,
            submitted: false,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let link = ctx.link().clone();
        spawn_local(async move {
            let gathered = metadata::collect().await;
            link.send_message(Msg::MetadataReady(Box::new(gathered)));
        });
        let link = ctx.link().clone();
        spawn_local(async move {
            let key = api::fetch_public_config()
                .await
                .ok()
                .and_then(|c| c.recaptcha_site_key);
            link.send_message(Msg::ConfigReady(key));
        });
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Msg) -> bool {
        match msg {
            Msg::SetName(value) => {
                self.full_name = value;
                false
            }
            Msg::SetEmail(value) => {
                self.email = value;
                false
            }
            Msg::ToggleOptIn => {
                self.newsletter_opt_in = !self.newsletter_opt_in;
                true
            }
            Msg::MetadataReady(gathered) => {
                self.metadata = Some(*gathered);
                false
            }
            Msg::ConfigReady(key) => {
                self.recaptcha_site_key = key;
                true
            }
            Msg::Submit => {
                if self.full_name.trim().is_empty() {
                    show_toast("Please enter your full name", true);
                    return false;
                }
                if self.email.trim().is_empty() || !self.email.contains('@') {
                    show_toast("Please enter a valid email address", true);
                    return false;
                }
                self.submitting = true;

                let request = NewSubmission {
                    kind: ctx.props().kind,
                    full_name: self.full_name.clone(),
                    email: self.email.clone(),
                    newsletter_opt_in: self.newsletter_opt_in,
                    metadata: self.metadata.clone().unwrap_or_default(),
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api::submit_form(&request).await {
                        Ok(_) => link.send_message(Msg::Accepted),
                        Err(e) => link.send_message(Msg::Failed(e)),
                    }
                });
                true
            }
            Msg::Accepted => {
                self.submitting = false;
                self.submitted = true;
                show_toast("Thank you — we received your submission.", false);
                true
            }
            Msg::Failed(error) => {
                self.submitting = false;
                show_toast(&format!("Something went wrong: {error}"), true);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let kind = ctx.props().kind;

        if self.submitted {
            return html! {
                <div class="form-card form-done">
                    <h2>{ "You're on the list!" }</h2>
                    <p>{ "Check your inbox — we'll be in touch shortly." }</p>
                </div>
            };
        }

        let on_name = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target().unwrap().dyn_into().unwrap();
            Msg::SetName(input.value())
        });
        let on_email = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target().unwrap().dyn_into().unwrap();
            Msg::SetEmail(input.value())
        });

        html! {
            <div class="form-card">
                <h2>{ kind.title() }</h2>
                <p class="form-blurb">{ form_blurb(kind) }</p>
                <label>
                    { "Full name" }
                    <input
                        type="text"
                        value={self.full_name.clone()}
                        oninput={on_name}
                        disabled={self.submitting}
                    />
                </label>
                <label>
                    { "Email" }
                    <input
                        type="email"
                        value={self.email.clone()}
                        oninput={on_email}
                        disabled={self.submitting}
                    />
                </label>
                <label class="opt-in">
                    <input
                        type="checkbox"
                        checked={self.newsletter_opt_in}
                        onchange={link.callback(|_| Msg::ToggleOptIn)}
                        disabled={self.submitting}
                    />
                    { "Keep me posted on the campaign" }
                </label>
                <button
                    class="submit"
                    onclick={link.callback(|_| Msg::Submit)}
                    disabled={self.submitting}
                >
                    { if self.submitting { "Sending..." } else { "Send" } }
                </button>
                {
                    if self.recaptcha_site_key.is_some() {
                        html! { <p class="recaptcha-note">{ "Protected by reCAPTCHA" }</p> }
                    } else {
                        html! {}
                    }
                }
            </div>
        }
    }
}

fn form_blurb(kind: SubmissionKind) -> &'static str {
    match kind {
        SubmissionKind::BeforeYouSign => {
            "Get the free guide to the contract clauses that trap timeshare buyers."
        }
        SubmissionKind::WhereScamsThrive => {
            "We'll send you the complaint map for the destinations you care about."
        }
        SubmissionKind::TimeshareChecklist => {
            "Get the printable checklist for the sales room — and for getting out."
        }
        SubmissionKind::ScamReport => {
            "Tell us where to reach you and an advocate will follow up on your report."
        }
    }
}
