use leptos::*;

pub mod components;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::MyGroupPanel;

#[component]
pub fn MyGroupPage() -> impl IntoView {
    view! { <MyGroupPanel /> }
}
