//! Administrative console.
//!
//! One table component serves every collection (the four submission kinds
//! plus petition signatures). The full row set is fetched up front;
//! searching, sorting and pagination slice it client-side via
//! `common::listing`. The component follows the state / messages / update
//! / view split used across this frontend.

pub mod messages;
pub mod state;
mod update;
mod view;

pub use state::AdminConsole;

use yew::{Component, Context, Html};

use messages::Msg;

impl Component for AdminConsole {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        AdminConsole::new()
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            ctx.link().send_message(Msg::Load);
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Msg) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
