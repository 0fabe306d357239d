use leptos::*;

use crate::utils::storage::{SessionStore, INSTALL_PROMPT_DISMISSED_KEY};

fn should_show_prompt(available: bool, dismissed: bool) -> bool {
    available && !dismissed
}

/// Offers "add to home screen" once the browser fires `beforeinstallprompt`.
#[component]
pub fn InstallPrompt() -> impl IntoView {
    let store = store_value(SessionStore::browser());
    let dismissed = create_rw_signal(store.with_value(|s| s.flag(INSTALL_PROMPT_DISMISSED_KEY)));
    let deferred = store_value(None::<web_sys::Event>);
    let available = create_rw_signal(false);

    #[cfg(target_arch = "wasm32")]
    {
        let handle = window_event_listener_untyped("beforeinstallprompt", move |ev| {
            ev.prevent_default();
            deferred.set_value(Some(ev));
            available.set(true);
        });
        on_cleanup(move || handle.remove());
    }

    let dismiss = move |_| {
        dismissed.set(true);
        if let Err(err) = store.with_value(|s| s.set_flag(INSTALL_PROMPT_DISMISSED_KEY)) {
            log::warn!("could not persist install prompt dismissal: {}", err);
        }
    };

    let install = move |_| {
        if let Some(event) = deferred.with_value(|ev| ev.clone()) {
            show_native_prompt(&event);
        }
        deferred.set_value(None);
        available.set(false);
    };

    view! {
        <Show when=move || should_show_prompt(available.get(), dismissed.get())>
            <div class="fixed bottom-4 inset-x-4 z-50 mx-auto max-w-md rounded-2xl bg-surface-elevated border border-border shadow-lg p-4 flex items-center gap-3">
                <span class="text-2xl" aria-hidden="true">"🌸"</span>
                <p class="flex-1 text-sm text-fg">"Instala Flores en tu teléfono para abrirla más rápido."</p>
                <button
                    type="button"
                    class="rounded-xl px-3 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                    on:click=install
                >
                    "Instalar"
                </button>
                <button
                    type="button"
                    class="text-sm text-fg-muted hover:text-fg"
                    on:click=dismiss
                >
                    "Ahora no"
                </button>
            </div>
        </Show>
    }
}

#[cfg(target_arch = "wasm32")]
fn show_native_prompt(event: &web_sys::Event) {
    use wasm_bindgen::JsCast;

    let prompt = js_sys::Reflect::get(event, &"prompt".into())
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok());
    match prompt {
        Some(prompt) => {
            if let Err(err) = prompt.call0(event) {
                log::warn!("install prompt failed: {:?}", err);
            }
        }
        None => log::warn!("install event without prompt()"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn show_native_prompt(_event: &web_sys::Event) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_needs_browser_event_and_no_dismissal() {
        assert!(!should_show_prompt(false, false));
        assert!(!should_show_prompt(true, true));
        assert!(should_show_prompt(true, false));
    }
}
