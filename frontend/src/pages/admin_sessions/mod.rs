use leptos::*;

pub mod components;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::AdminSessionsPanel;

#[component]
pub fn AdminSessionsPage() -> impl IntoView {
    view! { <AdminSessionsPanel /> }
}
