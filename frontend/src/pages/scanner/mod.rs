use leptos::*;

pub mod components;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::ScannerPanel;

#[component]
pub fn ScannerPage() -> impl IntoView {
    view! { <ScannerPanel /> }
}
