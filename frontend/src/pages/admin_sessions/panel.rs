use leptos::*;

use super::{
    components::{form::SessionForm, list::SessionList, qr_modal::QrModal},
    view_model::use_admin_sessions_view_model,
};
use crate::{
    components::{
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{ErrorMessage, Layout, LoadingSpinner, SuccessMessage},
    },
    state::query::QueryState,
};

#[component]
pub fn AdminSessionsPanel() -> impl IntoView {
    let vm = use_admin_sessions_view_model();
    let creating = Signal::derive(move || vm.create_action.pending().get());
    let deactivating = Signal::derive(move || vm.deactivate_action.pending().get());
    let qr_failed = Signal::derive(move || matches!(vm.qr.state(), QueryState::Failed(_)));

    view! {
        <Layout>
            <div class="space-y-6">
                <header>
                    <h1 class="text-2xl font-bold text-fg">"Gestión de Sesiones"</h1>
                    <p class="text-sm text-fg-muted">"Crea y administra las sesiones de asistencia"</p>
                </header>
                <SessionForm
                    form=vm.form
                    error=vm.form_error.into()
                    pending=creating
                    on_submit=Callback::new(move |_| vm.submit())
                />
                <section class="space-y-3">
                    <h2 class="text-lg font-semibold text-fg">"Sesiones Creadas"</h2>
                    {move || vm.flash.get().map(|msg| view! { <SuccessMessage message=msg /> })}
                    <InlineErrorMessage error=vm.action_error.into() />
                    {move || match vm.sessions.state() {
                        QueryState::Loading | QueryState::Disabled => {
                            view! { <LoadingSpinner label="Cargando sesiones..." /> }.into_view()
                        }
                        QueryState::Failed(_) => {
                            view! { <ErrorMessage message="Error al cargar las sesiones" /> }.into_view()
                        }
                        QueryState::Ready(sessions) if sessions.is_empty() => view! {
                            <EmptyState
                                title="No hay sesiones creadas aún."
                                description="Crea tu primera sesión arriba."
                                icon="📅"
                            />
                        }
                        .into_view(),
                        QueryState::Ready(sessions) => view! {
                            <ul class="grid gap-3 md:grid-cols-2">
                                <SessionList
                                    sessions=sessions
                                    on_show_qr=Callback::new(move |session| vm.show_qr(&session))
                                    on_deactivate=Callback::new(move |id| vm.ask_deactivate(id))
                                    deactivating=deactivating
                                />
                            </ul>
                        }
                        .into_view(),
                    }}
                </section>
            </div>
            <QrModal
                target=vm.qr_target.into()
                qr_code=Signal::derive(move || vm.qr_code())
                failed=qr_failed
                on_close=Callback::new(move |_| vm.close_qr())
            />
            <ConfirmDialog
                is_open=Signal::derive(move || vm.pending_deactivate.get().is_some())
                title="Desactivar sesión"
                message="¿Estás segura de desactivar esta sesión? No se podrá reactivar."
                confirm_label="Desactivar"
                destructive=true
                on_confirm=Callback::new(move |_| vm.confirm_deactivate())
                on_cancel=Callback::new(move |_| vm.cancel_deactivate())
            />
        </Layout>
    }
}
