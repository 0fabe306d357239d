use leptos::{ev::SubmitEvent, *};

use crate::components::layout::ErrorMessage;

#[component]
pub fn LoginForm(
    identification: RwSignal<String>,
    error: Signal<Option<String>>,
    pending: Signal<bool>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.call(());
    };

    view! {
        <form
            class="bg-surface-elevated rounded-2xl shadow-sm border border-border p-6 space-y-6"
            on:submit=handle_submit
        >
            <div class="space-y-2">
                <label for="identification" class="block text-sm font-medium text-fg">
                    "Número de identificación"
                </label>
                <input
                    id="identification"
                    name="identification"
                    type="text"
                    inputmode="numeric"
                    autocomplete="username"
                    class="block w-full rounded-xl border border-border bg-surface px-3 py-2 text-fg focus:outline-none focus:ring-2 focus:ring-action-primary-focus"
                    placeholder="Ej. 1020304050"
                    prop:value=move || identification.get()
                    disabled=move || pending.get()
                    on:input=move |ev| identification.set(event_target_value(&ev))
                />
            </div>

            <Show when=move || error.get().is_some()>
                <div role="alert">
                    <ErrorMessage message=error.get().unwrap_or_default() />
                </div>
            </Show>

            <button
                type="submit"
                disabled=move || pending.get()
                class="w-full inline-flex items-center justify-center rounded-xl px-4 py-3 text-base font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
            >
                {move || if pending.get() { "Ingresando..." } else { "Ingresar" }}
            </button>
        </form>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_identification_field_and_error() {
        let html = render_to_string(move || {
            view! {
                <LoginForm
                    identification=create_rw_signal(String::from("1001"))
                    error=Signal::derive(|| Some("Usuario no encontrado".to_string()))
                    pending=Signal::derive(|| false)
                    on_submit=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Número de identificación"));
        assert!(html.contains("Usuario no encontrado"));
        assert!(html.contains("Ingresar"));
    }
}
