use crate::api::{ApiError, ApiErrorKind};
use leptos::*;

fn hint(kind: ApiErrorKind) -> Option<&'static str> {
    match kind {
        ApiErrorKind::Forbidden => Some("No tienes permisos para esta acción."),
        ApiErrorKind::Network => Some("Revisa tu conexión e inténtalo de nuevo."),
        ApiErrorKind::Server => Some("El servidor no respondió correctamente."),
        _ => None,
    }
}

#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div
                class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded-xl space-y-1 my-2"
                role="alert"
            >
                <div class="font-semibold">{move || error.get().map(|e| e.message).unwrap_or_default()}</div>
                {move || {
                    error
                        .get()
                        .and_then(|e| hint(e.kind))
                        .map(|text| view! { <div class="text-xs opacity-75">{text}</div> })
                }}
            </div>
        </Show>
    }
}
