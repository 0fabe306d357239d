use leptos::*;

use super::{
    components::{form::GroupForm, list::GroupList, members_modal::MembersModal},
    view_model::use_admin_groups_view_model,
};
use crate::{
    components::{
        common::{Button, ButtonVariant},
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{ErrorMessage, Layout, LoadingSpinner, SuccessMessage},
    },
    state::query::QueryState,
};

#[component]
pub fn AdminGroupsPanel() -> impl IntoView {
    let vm = use_admin_groups_view_model();
    let form_pending = Signal::derive(move || {
        vm.create_action.pending().get() || vm.update_action.pending().get()
    });
    let busy = Signal::derive(move || vm.busy());
    let editing_id =
        Signal::derive(move || vm.form.mode.with(|mode| mode.editing_id().map(str::to_string)));
    let delete_message = Signal::derive(move || {
        vm.pending_delete
            .with(|group| group.as_ref().map(|g| g.name.clone()))
            .map(|name| {
                format!(
                    "¿Estás segura de eliminar el grupo \"{}\"? El grupo quedará desactivado.",
                    name
                )
            })
            .unwrap_or_default()
    });

    view! {
        <Layout>
            <div class="space-y-6">
                <header class="flex flex-col sm:flex-row sm:items-end justify-between gap-3">
                    <div>
                        <h1 class="text-2xl font-bold text-fg">"Gestión de Grupos"</h1>
                        <p class="text-sm text-fg-muted">
                            "Administra los grupos de trabajo de la comunidad"
                        </p>
                    </div>
                    <Show when=move || !vm.form.mode.with(|mode| mode.is_open())>
                        <Button variant=ButtonVariant::Primary on:click=move |_| vm.open_create()>
                            "+ Crear Grupo"
                        </Button>
                    </Show>
                </header>
                <Show when=move || vm.form.mode.with(|mode| mode.is_open())>
                    <GroupForm
                        form=vm.form
                        pending=form_pending
                        on_submit=Callback::new(move |_| vm.submit_form())
                        on_cancel=Callback::new(move |_| vm.cancel_form())
                    />
                </Show>
                {move || vm.flash.get().map(|msg| view! { <SuccessMessage message=msg /> })}
                <InlineErrorMessage error=vm.action_error.into() />
                {move || match vm.groups.state() {
                    QueryState::Loading | QueryState::Disabled => {
                        view! { <LoadingSpinner label="Cargando grupos..." /> }.into_view()
                    }
                    QueryState::Failed(_) => {
                        view! { <ErrorMessage message="Error al cargar grupos" /> }.into_view()
                    }
                    QueryState::Ready(groups) => view! {
                        <section class="space-y-3">
                            <h3 class="text-lg font-semibold text-fg">
                                {format!("Grupos ({})", groups.len())}
                            </h3>
                            {if groups.is_empty() {
                                view! {
                                    <EmptyState
                                        title="No hay grupos creados. Crea el primero para comenzar."
                                        icon="👥"
                                    />
                                }
                                .into_view()
                            } else {
                                view! {
                                    <ul class="space-y-3">
                                        <GroupList
                                            groups=groups
                                            busy=busy
                                            editing_id=editing_id
                                            on_edit=Callback::new(move |group| vm.edit(&group))
                                            on_toggle=Callback::new(move |group| vm.toggle_active(&group))
                                            on_members=Callback::new(move |group| vm.view_members(group))
                                            on_delete=Callback::new(move |group| vm.ask_delete(group))
                                        />
                                    </ul>
                                }
                                .into_view()
                            }}
                        </section>
                    }
                    .into_view(),
                }}
            </div>
            <MembersModal group=vm.members.into() on_close=Callback::new(move |_| vm.close_members()) />
            <ConfirmDialog
                is_open=Signal::derive(move || vm.pending_delete.with(Option::is_some))
                title="Eliminar grupo"
                message=delete_message
                confirm_label="Eliminar"
                destructive=true
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.cancel_delete())
            />
        </Layout>
    }
}
