use leptos::*;

use crate::components::modal::Modal;

#[component]
pub fn ConfirmDialog(
    is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    #[prop(into)] message: MaybeSignal<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional, into)] confirm_label: MaybeSignal<String>,
    #[prop(optional, into)] cancel_label: MaybeSignal<String>,
    #[prop(optional, into)] confirm_disabled: MaybeSignal<bool>,
    #[prop(optional)] destructive: bool,
) -> impl IntoView {
    let confirm_button_class = if destructive {
        "inline-flex items-center justify-center rounded-xl px-4 py-2 text-sm font-semibold bg-action-danger-bg text-action-danger-text hover:bg-action-danger-bg-hover disabled:opacity-50"
    } else {
        "inline-flex items-center justify-center rounded-xl px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
    };

    let confirm_label_text = Signal::derive(move || label_or(confirm_label.get(), "Confirmar"));
    let cancel_label_text = Signal::derive(move || label_or(cancel_label.get(), "Cancelar"));
    let title_text = Signal::derive(move || title.get());
    let message_text = Signal::derive(move || message.get());
    let confirm_disabled = Signal::derive(move || confirm_disabled.get());

    view! {
        <Modal is_open=is_open title=title_text on_close=on_cancel>
            <p class="text-sm text-fg-muted">{move || message_text.get()}</p>
            <div class="flex justify-end gap-2 pt-2">
                <button
                    type="button"
                    class="inline-flex items-center justify-center rounded-xl px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                    on:click=move |_| on_cancel.call(())
                >
                    {move || cancel_label_text.get()}
                </button>
                <button
                    type="button"
                    class=confirm_button_class
                    disabled=move || confirm_disabled.get()
                    on:click=move |_| on_confirm.call(())
                >
                    {move || confirm_label_text.get()}
                </button>
            </div>
        </Modal>
    }
}

fn label_or(text: String, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}
