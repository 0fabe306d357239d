use leptos::*;

pub mod components;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::AdminUsersPanel;

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    view! { <AdminUsersPanel /> }
}
