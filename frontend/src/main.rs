use crate::app::App;

mod api;
mod app;
mod components;
mod helpers;
mod metadata;

fn main() {
    yew::Renderer::<App>::new().render();
}
