use leptos::ev::KeyboardEvent;
use leptos::*;

/// Overlay dialog closed by the backdrop, the header button or Escape.
#[component]
pub fn Modal(
    is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    on_close: Callback<()>,
    #[prop(optional)] size_class: Option<&'static str>,
    children: ChildrenFn,
) -> impl IntoView {
    let width = size_class.unwrap_or("max-w-md");
    let children = store_value(children);
    let title = Signal::derive(move || title.get());

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Cerrar"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_close.call(())
                ></button>
                <div
                    class=format!(
                        "relative z-[71] w-full {} max-h-[90vh] overflow-y-auto rounded-2xl bg-surface-elevated shadow-xl border border-border p-6 space-y-4",
                        width
                    )
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_close.call(());
                        }
                    }
                >
                    <div class="flex items-start justify-between gap-3">
                        <h2 class="text-lg font-semibold text-fg">{move || title.get()}</h2>
                        <button
                            type="button"
                            aria-label="Cerrar"
                            class="text-fg-muted hover:text-fg"
                            on:click=move |_| on_close.call(())
                        >
                            {"✕"}
                        </button>
                    </div>
                    {move || children.with_value(|children| children())}
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn open_modal_renders_title_and_body() {
        let html = render_to_string(move || {
            view! {
                <Modal is_open=Signal::derive(|| true) title="QR de la sesión" on_close=Callback::new(|_| {})>
                    <p>"contenido"</p>
                </Modal>
            }
        });
        assert!(html.contains("QR de la sesión"));
        assert!(html.contains("contenido"));
        assert!(html.contains("bg-overlay-backdrop"));
    }
}
