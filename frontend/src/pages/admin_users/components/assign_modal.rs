use leptos::*;

use crate::{
    api::{Group, GroupHistory},
    components::{
        common::{Badge, Button, ButtonVariant},
        layout::LoadingSpinner,
        modal::Modal,
    },
    pages::{admin_groups::utils::integrant_count_label, admin_users::view_model::AssignState},
    state::query::{Query, QueryState},
    utils::time::format_datetime_es,
};

#[component]
fn GroupOptions(groups: Vec<Group>, selected: RwSignal<Option<String>>) -> impl IntoView {
    groups
        .into_iter()
        .map(|group| {
            let Group {
                id,
                name,
                member_count,
                is_active,
                ..
            } = group;
            let checked_id = id.clone();
            let pick_id = id.clone();
            let value_id = id.clone();
            view! {
                <label class=move || {
                    format!(
                        "flex items-center gap-3 rounded-xl border px-3 py-2 {} {}",
                        if selected.with(|s| s.as_deref() == Some(checked_id.as_str())) {
                            "border-action-primary-bg"
                        } else {
                            "border-border"
                        },
                        if is_active { "cursor-pointer" } else { "opacity-50 cursor-not-allowed" },
                    )
                }>
                    <input
                        type="radio"
                        name="group"
                        value=value_id
                        disabled=!is_active
                        prop:checked=move || selected.with(|s| s.as_deref() == Some(id.as_str()))
                        on:change=move |_| selected.set(Some(pick_id.clone()))
                    />
                    <span class="flex-1 text-fg">{name}</span>
                    <span class="text-xs text-fg-muted">{integrant_count_label(member_count)}</span>
                    {(!is_active).then(|| view! { <Badge>"Inactivo"</Badge> })}
                </label>
            }
        })
        .collect_view()
}

#[component]
fn HistoryList(history: GroupHistory) -> impl IntoView {
    if history.history.is_empty() {
        return view! { <p class="text-xs text-fg-muted">"Sin cambios anteriores."</p> }.into_view();
    }
    history
        .history
        .into_iter()
        .map(|entry| {
            view! {
                <li class="text-xs text-fg-muted">
                    <span class="font-medium text-fg">{entry.group_name}</span>
                    {format!(" · {} · {}", format_datetime_es(&entry.changed_at), entry.changed_by)}
                    {entry.reason.map(|reason| view! { <span class="block italic">{reason}</span> })}
                </li>
            }
        })
        .collect_view()
}

#[component]
pub fn AssignGroupModal(
    state: AssignState,
    groups: Query<Vec<Group>>,
    history: Query<GroupHistory>,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let is_open = Signal::derive(move || state.user.with(Option::is_some));

    view! {
        <Modal is_open=is_open title="Asignar Grupo de Trabajo" on_close=on_close size_class="max-w-lg">
            {move || {
                state.user.get().map(|user| view! {
                    <div class="flex items-center justify-between gap-2">
                        <p class="font-medium text-fg">{user.name}</p>
                        {user.group.map(|group| view! { <Badge>{format!("Grupo actual: {}", group.name)}</Badge> })}
                    </div>
                })
            }}
            <div class="space-y-2">
                <p class="text-sm font-medium text-fg">"Selecciona un grupo:"</p>
                {move || match groups.state() {
                    QueryState::Ready(list) => view! {
                        <div class="space-y-2">
                            <GroupOptions groups=list selected=state.group_id />
                        </div>
                    }
                    .into_view(),
                    QueryState::Failed(err) => view! {
                        <p class="text-sm text-status-error-text">{err.message}</p>
                    }
                    .into_view(),
                    _ => view! { <LoadingSpinner label="Cargando grupos..." /> }.into_view(),
                }}
            </div>
            <div class="space-y-1">
                <label for="assign-reason" class="text-sm font-medium text-fg">
                    "Razón del cambio (opcional):"
                </label>
                <textarea
                    id="assign-reason"
                    rows="3"
                    class="w-full rounded-xl border border-form-control-border bg-form-control-bg text-fg px-3 py-2"
                    placeholder="Ejemplo: Cambio de equipo de trabajo"
                    prop:value=move || state.reason.get()
                    on:input=move |ev| state.reason.set(event_target_value(&ev))
                ></textarea>
            </div>
            <div class="space-y-1">
                <p class="text-sm font-medium text-fg">"Historial de grupos"</p>
                <ul class="space-y-1">
                    {move || match history.state() {
                        QueryState::Ready(history) => view! { <HistoryList history=history /> }.into_view(),
                        QueryState::Failed(_) => view! {
                            <li class="text-xs text-status-error-text">"No se pudo cargar el historial"</li>
                        }
                        .into_view(),
                        _ => ().into_view(),
                    }}
                </ul>
            </div>
            {move || {
                state
                    .error
                    .get()
                    .map(|msg| view! { <p class="text-sm text-status-error-text" role="alert">{msg}</p> })
            }}
            <div class="flex justify-end gap-2">
                <Button variant=ButtonVariant::Secondary disabled=pending on:click=move |_| on_close.call(())>
                    "Cancelar"
                </Button>
                <Button
                    variant=ButtonVariant::Primary
                    loading=pending
                    disabled=Signal::derive(move || state.group_id.with(Option::is_none))
                    on:click=move |_| on_submit.call(())
                >
                    "Asignar Grupo"
                </Button>
            </div>
        </Modal>
    }
}
