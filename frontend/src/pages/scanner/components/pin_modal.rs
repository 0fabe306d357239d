use leptos::*;

use crate::{
    components::{
        common::{Button, ButtonVariant},
        modal::Modal,
    },
    scanner::{pin::PIN_LENGTH, sanitize_pin_input},
};

#[component]
pub fn PinModal(
    is_open: Signal<bool>,
    value: RwSignal<String>,
    error: Signal<Option<String>>,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <Modal is_open=is_open title="Ingresar PIN" on_close=on_close size_class="max-w-sm">
            <form
                class="space-y-4"
                on:submit=move |ev| {
                    ev.prevent_default();
                    on_submit.call(());
                }
            >
                <p class="text-sm text-fg-muted">
                    "Escribe el PIN de 4 dígitos que comparte la servidora."
                </p>
                <input
                    type="text"
                    inputmode="numeric"
                    autocomplete="one-time-code"
                    maxlength=PIN_LENGTH.to_string()
                    placeholder="0000"
                    aria-label="PIN de la sesión"
                    class="w-full text-center text-3xl tracking-[0.5em] font-mono rounded-xl border border-form-control-border bg-form-control-bg text-fg px-4 py-3"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(sanitize_pin_input(&event_target_value(&ev)))
                />
                {move || {
                    error
                        .get()
                        .map(|msg| view! { <p class="text-sm text-status-error-text" role="alert">{msg}</p> })
                }}
                <div class="flex justify-end gap-2">
                    <Button variant=ButtonVariant::Secondary on:click=move |_| on_close.call(())>
                        "Cancelar"
                    </Button>
                    <button
                        type="submit"
                        class=format!(
                            "inline-flex items-center justify-center rounded-xl px-4 py-2 text-sm font-semibold disabled:opacity-50 {}",
                            ButtonVariant::Primary.classes()
                        )
                        disabled=move || pending.get() || value.with(|pin| pin.len() != PIN_LENGTH)
                    >
                        "Registrar"
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn open_modal_shows_error_and_input() {
        let html = render_to_string(move || {
            let value = create_rw_signal("12".to_string());
            view! {
                <PinModal
                    is_open=Signal::derive(|| true)
                    value=value
                    error=Signal::derive(|| Some("El PIN debe tener 4 dígitos".to_string()))
                    pending=Signal::derive(|| false)
                    on_submit=Callback::new(|_| {})
                    on_close=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Ingresar PIN"));
        assert!(html.contains("maxlength=\"4\""));
        assert!(html.contains("El PIN debe tener 4 dígitos"));
    }
}
