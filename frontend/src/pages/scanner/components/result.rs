use leptos::*;

use crate::{
    components::common::{Badge, Button, ButtonVariant},
    pages::scanner::utils::{flowers_label, status_icon, status_tone},
    router::JARDIN_PATH,
    scanner::{ScanOutcome, ScanStatus},
};

#[component]
pub fn ScanResult(
    #[prop(into)] status: Signal<ScanStatus>,
    #[prop(into)] outcome: Signal<Option<ScanOutcome>>,
    on_again: Callback<()>,
) -> impl IntoView {
    let message = move || {
        outcome
            .get()
            .map(|outcome| outcome.message().to_string())
            .unwrap_or_default()
    };
    let earned = move || match outcome.get() {
        Some(ScanOutcome::Awarded { delta, .. }) => flowers_label(delta),
        _ => None,
    };
    let session_name = move || match outcome.get() {
        Some(ScanOutcome::Awarded { session_name, .. }) => session_name,
        _ => None,
    };

    view! {
        <div class="flex flex-col items-center gap-4 text-center py-6">
            <div class="text-6xl" aria-hidden="true">{move || status_icon(status.get())}</div>
            {move || {
                let tone = status_tone(status.get());
                view! {
                    <Badge tone=tone>
                        <span role="status">{message()}</span>
                    </Badge>
                }
            }}
            {move || session_name().map(|name| view! { <p class="text-sm text-fg-muted">{name}</p> })}
            {move || earned().map(|label| view! { <p class="text-2xl font-bold text-fg">{label}</p> })}
            <div class="flex flex-col sm:flex-row gap-3 w-full sm:w-auto">
                <Button variant=ButtonVariant::Primary on:click=move |_| on_again.call(())>
                    "Escanear Otra"
                </Button>
                <a
                    href=JARDIN_PATH
                    class="inline-flex items-center justify-center rounded-xl px-4 py-2 text-sm font-semibold bg-surface-muted text-fg border border-border hover:bg-surface-elevated"
                >
                    "Ver Jardín de Emaús"
                </a>
            </div>
        </div>
    }
}
