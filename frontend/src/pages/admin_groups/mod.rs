use leptos::*;

pub mod components;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::AdminGroupsPanel;

#[component]
pub fn AdminGroupsPage() -> impl IntoView {
    view! { <AdminGroupsPanel /> }
}
