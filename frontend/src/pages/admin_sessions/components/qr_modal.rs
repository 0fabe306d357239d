use leptos::*;

use crate::{
    components::{
        common::{Button, ButtonVariant},
        layout::LoadingSpinner,
        modal::Modal,
    },
    pages::admin_sessions::utils::QrTarget,
    utils::{
        download::{print_qr, qr_download_name, trigger_url_download},
        qr::qr_image_src,
    },
};

#[component]
pub fn QrModal(
    target: Signal<Option<QrTarget>>,
    #[prop(into)] qr_code: Signal<Option<String>>,
    #[prop(into)] failed: Signal<bool>,
    on_close: Callback<()>,
) -> impl IntoView {
    let is_open = Signal::derive(move || target.with(Option::is_some));
    let title = Signal::derive(move || target.get().map(|t| t.name).unwrap_or_default());
    let src = create_memo(move |_| qr_code.get().and_then(|code| qr_image_src(&code)));

    let download = move |_| {
        let (Some(target), Some(src)) = (target.get_untracked(), src.get_untracked()) else {
            return;
        };
        if let Err(err) = trigger_url_download(&qr_download_name(&target.session_id, &src), &src) {
            log::warn!("qr download failed: {}", err);
        }
    };
    let print = move |_| {
        let (Some(target), Some(src)) = (target.get_untracked(), src.get_untracked()) else {
            return;
        };
        if let Err(err) = print_qr(&target.name, &target.session_id, target.pin.as_deref(), &src) {
            log::warn!("qr print failed: {}", err);
        }
    };

    view! {
        <Modal is_open=is_open title=title on_close=on_close>
            <div class="flex flex-col items-center gap-3">
                {move || match src.get() {
                    Some(src) => view! {
                        <img
                            src=src
                            alt=move || format!("QR de {}", title.get())
                            class="w-64 h-64 rounded-xl bg-white p-2"
                        />
                    }
                    .into_view(),
                    None if failed.get() => view! {
                        <p class="text-sm text-status-error-text">"No se pudo cargar el código QR"</p>
                    }
                    .into_view(),
                    None => view! { <LoadingSpinner /> }.into_view(),
                }}
                {move || {
                    target.get().map(|target| view! {
                        <p class="text-xs font-mono text-fg-muted">{format!("ID: {}", target.session_id)}</p>
                        {target.pin.map(|pin| view! {
                            <p class="text-lg font-semibold text-fg">{format!("PIN: {}", pin)}</p>
                        })}
                    })
                }}
                <div class="grid grid-cols-2 gap-2 w-full">
                    <Button
                        variant=ButtonVariant::Primary
                        disabled=Signal::derive(move || src.get().is_none())
                        on:click=download
                    >
                        "Descargar QR"
                    </Button>
                    <Button
                        variant=ButtonVariant::Secondary
                        disabled=Signal::derive(move || src.get().is_none())
                        on:click=print
                    >
                        "Imprimir"
                    </Button>
                </div>
            </div>
        </Modal>
    }
}
