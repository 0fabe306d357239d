use leptos::{ev, *};
use wasm_bindgen::JsCast;

use crate::{
    components::common::{Button, ButtonVariant},
    pages::admin_users::{utils::format_file_size, view_model::SelectedCsv},
};

const INPUT_ID: &str = "csv-file-input";

type PickedFile = (String, f64, Option<web_sys::File>);

fn first_file(files: Option<web_sys::FileList>) -> Option<PickedFile> {
    let file = files?.get(0)?;
    Some((file.name(), file.size(), Some(file)))
}

#[component]
pub fn CsvUpload(
    selected: Signal<Option<SelectedCsv>>,
    error: Signal<Option<String>>,
    #[prop(into)] pending: Signal<bool>,
    on_select: Callback<PickedFile>,
    on_upload: Callback<()>,
    on_reset: Callback<()>,
) -> impl IntoView {
    let drag_active = create_rw_signal(false);

    let on_change = move |ev: ev::Event| {
        let input = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok());
        if let Some(picked) = input.as_ref().and_then(|input| first_file(input.files())) {
            on_select.call(picked);
        }
        if let Some(input) = input {
            input.set_value("");
        }
    };
    let on_drag = move |ev: ev::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        drag_active.set(ev.type_() != "dragleave");
    };
    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        drag_active.set(false);
        match first_file(ev.data_transfer().and_then(|transfer| transfer.files())) {
            Some(picked) => on_select.call(picked),
            None => on_select.call((String::new(), 0.0, None)),
        }
    };

    view! {
        <div class="space-y-3">
            <div
                class=move || {
                    if drag_active.get() {
                        "rounded-2xl border-2 border-dashed border-action-primary-bg bg-surface-muted p-6 text-center"
                    } else {
                        "rounded-2xl border-2 border-dashed border-border-strong p-6 text-center"
                    }
                }
                on:dragenter=on_drag
                on:dragover=on_drag
                on:dragleave=on_drag
                on:drop=on_drop
            >
                <input id=INPUT_ID type="file" accept=".csv" class="sr-only" on:change=on_change />
                {move || match selected.get() {
                    None => view! {
                        <label for=INPUT_ID class="cursor-pointer block space-y-2">
                            <div class="text-4xl" aria-hidden="true">"📄"</div>
                            <p class="text-sm text-fg">
                                "Arrastra un archivo CSV aquí o "
                                <span class="text-action-primary-bg underline">"haz clic para seleccionar"</span>
                            </p>
                            <p class="text-xs text-fg-muted">"Formato: name, identification, role"</p>
                        </label>
                    }
                    .into_view(),
                    Some(file) => view! {
                        <div class="flex flex-col items-center gap-3">
                            <div class="flex items-center gap-2">
                                <span aria-hidden="true">"📄"</span>
                                <div class="text-left">
                                    <p class="font-medium text-fg">{file.name}</p>
                                    <p class="text-xs text-fg-muted">{format_file_size(file.size)}</p>
                                </div>
                            </div>
                            <div class="flex gap-2">
                                <Button
                                    variant=ButtonVariant::Primary
                                    loading=pending
                                    on:click=move |_| on_upload.call(())
                                >
                                    "Importar"
                                </Button>
                                <Button
                                    variant=ButtonVariant::Ghost
                                    disabled=pending
                                    on:click=move |_| on_reset.call(())
                                >
                                    "Cambiar archivo"
                                </Button>
                            </div>
                        </div>
                    }
                    .into_view(),
                }}
            </div>
            {move || {
                error
                    .get()
                    .map(|msg| view! { <p class="text-sm text-status-error-text" role="alert">{msg}</p> })
            }}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    fn render(selected: Option<SelectedCsv>, error: Option<String>) -> String {
        render_to_string(move || {
            view! {
                <CsvUpload
                    selected=Signal::derive(move || selected.clone())
                    error=Signal::derive(move || error.clone())
                    pending=Signal::derive(|| false)
                    on_select=Callback::new(|_| {})
                    on_upload=Callback::new(|_| {})
                    on_reset=Callback::new(|_| {})
                />
            }
        })
    }

    #[test]
    fn empty_dropzone_invites_selection() {
        let html = render(None, None);
        assert!(html.contains("haz clic para seleccionar"));
        assert!(html.contains("accept=\".csv\""));
    }

    #[test]
    fn selected_file_shows_size_and_actions() {
        let html = render(
            Some(SelectedCsv {
                name: "usuarias.csv".into(),
                size: 2048.0,
            }),
            Some("Por favor selecciona un archivo CSV válido".into()),
        );
        assert!(html.contains("usuarias.csv"));
        assert!(html.contains("2.00 KB"));
        assert!(html.contains("Importar"));
        assert!(html.contains("Cambiar archivo"));
        assert!(html.contains("archivo CSV válido"));
    }
}
