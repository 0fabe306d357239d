use leptos::*;

pub mod components;
pub mod utils;

mod panel;

pub use panel::JardinPanel;

#[component]
pub fn JardinPage() -> impl IntoView {
    view! { <JardinPanel /> }
}
