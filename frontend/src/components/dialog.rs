//! Slide-in detail panel.
//!
//! The panel is always in the DOM; `open_panel`/`close_panel` toggle a
//! `show` class on it through a deferred classList call, which lets the
//! CSS transition play.

use uuid::Uuid;
use web_sys::js_sys;
use yew::{html, Component, Context, Html, NodeRef, Properties};

pub struct SlidePanel {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for SlidePanel {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="slide-panel" id={self.id.clone()} ref={ctx.props().node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }
}

pub fn open_panel(panel_ref: &NodeRef) {
    toggle_class(panel_ref, "add");
}

pub fn close_panel(panel_ref: &NodeRef) {
    toggle_class(panel_ref, "remove");
}

fn toggle_class(panel_ref: &NodeRef, operation: &str) {
    if let Some(panel) = panel_ref.cast::<web_sys::HtmlElement>() {
        let func = js_sys::Function::new_no_args(&format!(
            "document.querySelector('#{}').classList.{}('show')",
            panel.id(),
            operation
        ));
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&func, 50);
        }
    }
}
