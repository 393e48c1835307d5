//! Landing page: hero, explainer sections, and the featured form.

use yew::{html, Component, Context, Html};

use common::model::submission::SubmissionKind;

use crate::components::submission_form::SubmissionForm;

pub struct Home;

impl Component for Home {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="page home-page">
                <section class="hero">
                    <h1>{ "Don't sign away your future." }</h1>
                    <p>
                        { "High-pressure timeshare presentations cost families thousands every \
                           year — and fraudulent \"exit\" companies target the same victims twice. \
                           Learn what to look for before you sign anything." }
                    </p>
                    <a class="cta" href="#petition">{ "Sign the petition" }</a>
                </section>

                <section class="info-cards">
                    <div class="card">
                        <h2>{ "Before You Sign" }</h2>
                        <p>{ "Get our free guide to the contract clauses that trap buyers." }</p>
                        <a href="#before_you_sign">{ "Get the guide" }</a>
                    </div>
                    <div class="card">
                        <h2>{ "Where Scams Thrive" }</h2>
                        <p>{ "See the destinations and venues where complaints cluster." }</p>
                        <a href="#where_scams_thrive">{ "See the map" }</a>
                    </div>
                    <div class="card">
                        <h2>{ "Timeshare Checklist" }</h2>
                        <p>{ "A printable checklist for the sales room — and for getting out." }</p>
                        <a href="#timeshare_checklist">{ "Get the checklist" }</a>
                    </div>
                    <div class="card">
                        <h2>{ "Report a Scam" }</h2>
                        <p>{ "Been targeted? Your report helps us document the pattern." }</p>
                        <a href="#scam_report">{ "File a report" }</a>
                    </div>
                </section>

                <section class="featured-form">
                    <SubmissionForm kind={SubmissionKind::BeforeYouSign} />
                </section>
            </div>
        }
    }
}
