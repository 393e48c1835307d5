//! Petition page: story, live progress toward the goal, and the sign form.

use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::metadata::ClientMetadata;
use common::model::petition::Petition;
use common::requests::SignPetition;

use crate::api;
use crate::helpers::{format_count, show_toast};
use crate::metadata;

pub struct PetitionPage {
    petition: Option<Petition>,
    loading: bool,
    error: Option<String>,
    full_name: String,
    email: String,
    newsletter_opt_in: bool,
    metadata: Option<ClientMetadata>,
    signing: bool,
    signed: bool,
}

pub enum Msg {
    Loaded(Result<Vec<Petition>, String>),
    MetadataReady(Box<ClientMetadata>),
    SetName(String),
    SetEmail(String),
    ToggleOptIn,
    Sign,
    Signed(i64),
    Failed(String),
}

impl Component for PetitionPage {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            petition: None,
            loading: true,
            error: None,
            full_name: String::new(),
            email: String::new(),
            newsletter_opt_in: true,
            metadata: None,
            signing: false,
            signed: false,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api::fetch_petitions().await));
        });
        let link = ctx.link().clone();
        spawn_local(async move {
            let gathered = metadata::collect().await;
            link.send_message(Msg::MetadataReady(Box::new(gathered)));
        });
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Msg) -> bool {
        match msg {
            Msg::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(mut petitions) => {
                        if petitions.is_empty() {
                            self.error = Some("No active petition right now.".to_string());
                        } else {
                            self.petition = Some(petitions.remove(0));
                        }
                    }
                    Err(e) => self.error = Some(e),
                }
                true
            }
            Msg::MetadataReady(gathered) => {
                self.metadata = Some(*gathered);
                false
            }
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
            Msg::Sign => {
                if self.full_name.trim().is_empty()
                    || self.email.trim().is_empty()
                    || !self.email.contains('@')
                {
                    show_toast("Please enter your name and a valid email", true);
                    return false;
                }
                let Some(petition) = self.petition.as_ref() else {
                    return false;
                };
                self.signing = true;

                let petition_id = petition.id.clone();
                let request = SignPetition {
                    full_name: self.full_name.clone(),
                    email: self.email.clone(),
                    newsletter_opt_in: self.newsletter_opt_in,
                    metadata: self.metadata.clone().unwrap_or_default(),
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api::sign_petition(&petition_id, &request).await {
                        Ok(accepted) => link.send_message(Msg::Signed(accepted.signature_count)),
                        Err(e) => link.send_message(Msg::Failed(e)),
                    }
                });
                true
            }
            Msg::Signed(count) => {
                self.signing = false;
                self.signed = true;
                if let Some(petition) = self.petition.as_mut() {
                    petition.signature_count = count;
                }
                show_toast("Thank you for signing!", false);
                true
            }
            Msg::Failed(error) => {
                self.signing = false;
                show_toast(&format!("Could not record your signature: {error}"), true);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if self.loading {
            return html! { <div class="page petition-page"><div class="spinner" /></div> };
        }
        if let Some(error) = &self.error {
            return html! {
                <div class="page petition-page"><p class="error">{ error }</p></div>
            };
        }
        let Some(petition) = self.petition.as_ref() else {
            return html! {};
        };

        let percent = if petition.goal > 0 {
            ((petition.signature_count as f64 / petition.goal as f64) * 100.0).min(100.0)
        } else {
            0.0
        };

        html! {
            <div class="page petition-page">
                <h1>{ &petition.title }</h1>
                <p class="story">{ &petition.story }</p>

                <div class="progress">
                    <div class="progress-bar">
                        <div
                            class="progress-fill"
                            style={format!("width: {percent:.1}%")}
                        />
                    </div>
                    <p class="progress-label">
                        { format!(
                            "{} of {} signatures",
                            format_count(petition.signature_count),
                            format_count(petition.goal),
                        ) }
                    </p>
                </div>

                { self.sign_form(ctx) }
            </div>
        }
    }
}

impl PetitionPage {
    fn sign_form(&self, ctx: &Context<Self>) -> Html {
        if self.signed {
            return html! {
                <div class="form-card form-done">
                    <h2>{ "Your signature is in." }</h2>
                    <p>{ "Share the petition so more people see it." }</p>
                </div>
            };
        }

        let link = ctx.link();
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
                <h2>{ "Add your name" }</h2>
                <label>
                    { "Full name" }
                    <input
                        type="text"
                        value={self.full_name.clone()}
                        oninput={on_name}
                        disabled={self.signing}
                    />
                </label>
                <label>
                    { "Email" }
                    <input
                        type="email"
                        value={self.email.clone()}
                        oninput={on_email}
                        disabled={self.signing}
                    />
                </label>
                <label class="opt-in">
                    <input
                        type="checkbox"
                        checked={self.newsletter_opt_in}
                        onchange={link.callback(|_| Msg::ToggleOptIn)}
                        disabled={self.signing}
                    />
                    { "Keep me posted on the campaign" }
                </label>
                <button
                    class="submit"
                    onclick={link.callback(|_| Msg::Sign)}
                    disabled={self.signing}
                >
                    { if self.signing { "Signing..." } else { "Sign the petition" } }
                </button>
            </div>
        }
    }
}
