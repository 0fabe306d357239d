use leptos::*;

use super::{
    components::{pin_modal::PinModal, result::ScanResult},
    view_model::use_scanner_view_model,
};
use crate::{
    components::{
        common::{Button, ButtonVariant, Card},
        layout::Layout,
    },
    scanner::{ScanStatus, READER_ELEMENT_ID},
};

#[component]
pub fn ScannerPanel() -> impl IntoView {
    let vm = use_scanner_view_model();
    let status = create_memo(move |_| vm.machine.with(|machine| machine.status()));
    let outcome = Signal::derive(move || vm.machine.with(|machine| machine.outcome().cloned()));
    let pending = Signal::derive(move || vm.scan_action.pending().get());

    view! {
        <Layout>
            <div class="max-w-md mx-auto space-y-4">
                <div class="text-center space-y-1">
                    <h2 class="text-2xl font-bold text-fg">"Registrar Asistencia"</h2>
                    <p class="text-sm text-fg-muted">"Escanea el código QR de la sesión"</p>
                </div>
                <Card>
                    {move || match status.get() {
                        ScanStatus::Idle => view! {
                            <div class="flex flex-col items-center gap-4 py-6 text-center">
                                <div class="text-6xl" aria-hidden="true">"📷"</div>
                                <p class="text-sm text-fg-muted">
                                    "Presiona el botón para activar la cámara"
                                </p>
                                <Button variant=ButtonVariant::Primary on:click=move |_| vm.start_camera()>
                                    "Activar Cámara"
                                </Button>
                                <Button variant=ButtonVariant::Ghost on:click=move |_| vm.open_pin()>
                                    "Ingresar PIN"
                                </Button>
                            </div>
                        }
                        .into_view(),
                        ScanStatus::Scanning | ScanStatus::Submitting => view! {
                            <div class="flex flex-col items-center gap-4">
                                <div
                                    id=READER_ELEMENT_ID
                                    class="w-full aspect-square overflow-hidden rounded-xl bg-surface-muted"
                                ></div>
                                {move || {
                                    if status.get() == ScanStatus::Submitting {
                                        view! {
                                            <div class="flex items-center gap-2 text-sm text-fg-muted">
                                                <span class="h-4 w-4 animate-spin rounded-full border-2 border-current border-t-transparent"></span>
                                                "Registrando asistencia..."
                                            </div>
                                        }
                                        .into_view()
                                    } else {
                                        view! {
                                            <p class="text-sm text-fg-muted">
                                                "Centra el código QR en el recuadro"
                                            </p>
                                        }
                                        .into_view()
                                    }
                                }}
                                <div class="flex gap-3">
                                    <Button
                                        variant=ButtonVariant::Secondary
                                        disabled=Signal::derive(move || status.get() == ScanStatus::Submitting)
                                        on:click=move |_| vm.cancel()
                                    >
                                        "Cancelar"
                                    </Button>
                                    <Button
                                        variant=ButtonVariant::Ghost
                                        disabled=Signal::derive(move || status.get() == ScanStatus::Submitting)
                                        on:click=move |_| vm.open_pin()
                                    >
                                        "Ingresar PIN"
                                    </Button>
                                </div>
                            </div>
                        }
                        .into_view(),
                        _ => view! {
                            <ScanResult
                                status=status
                                outcome=outcome
                                on_again=Callback::new(move |_| vm.reset())
                            />
                        }
                        .into_view(),
                    }}
                </Card>
            </div>
            <PinModal
                is_open=vm.pin.open.into()
                value=vm.pin.value
                error=vm.pin.error.into()
                pending=pending
                on_submit=Callback::new(move |_| vm.submit_pin())
                on_close=Callback::new(move |_| vm.pin.reset())
            />
        </Layout>
    }
}
