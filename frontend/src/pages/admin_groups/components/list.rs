use leptos::*;

use crate::{
    api::Group,
    components::common::{Badge, BadgeTone, Button, ButtonVariant, Card},
    pages::admin_groups::utils::{active_label, integrant_count_label},
};

#[component]
fn GroupItem(
    group: Group,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] editing: Signal<bool>,
    on_edit: Callback<Group>,
    on_toggle: Callback<Group>,
    on_members: Callback<Group>,
    on_delete: Callback<Group>,
) -> impl IntoView {
    let name = group.name.clone();
    let is_active = group.is_active;
    let has_members = group.member_count > 0;
    let count = integrant_count_label(group.member_count);
    let group = store_value(group);
    let tone = if is_active {
        BadgeTone::Success
    } else {
        BadgeTone::Neutral
    };

    view! {
        <li>
            <Card class="flex flex-col sm:flex-row sm:items-center justify-between gap-3">
                <div class="space-y-1">
                    <h4 class="font-semibold text-fg">{name}</h4>
                    <div class="flex flex-wrap items-center gap-2">
                        <Badge tone=tone>{active_label(is_active)}</Badge>
                        <button
                            type="button"
                            class="text-xs text-fg-muted underline disabled:no-underline disabled:cursor-default"
                            disabled=!has_members
                            on:click=move |_| on_members.call(group.get_value())
                        >
                            {count}
                        </button>
                    </div>
                </div>
                <div class="flex gap-2">
                    <Button
                        variant=ButtonVariant::Secondary
                        disabled=Signal::derive(move || editing.get() || busy.get())
                        on:click=move |_| on_edit.call(group.get_value())
                    >
                        "Editar"
                    </Button>
                    <Button
                        variant=if is_active { ButtonVariant::Ghost } else { ButtonVariant::Secondary }
                        disabled=busy
                        on:click=move |_| on_toggle.call(group.get_value())
                    >
                        {if is_active { "Desactivar" } else { "Activar" }}
                    </Button>
                    <Button
                        variant=ButtonVariant::Danger
                        disabled=busy
                        on:click=move |_| on_delete.call(group.get_value())
                    >
                        "Eliminar"
                    </Button>
                </div>
            </Card>
        </li>
    }
}

#[component]
pub fn GroupList(
    groups: Vec<Group>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] editing_id: Signal<Option<String>>,
    on_edit: Callback<Group>,
    on_toggle: Callback<Group>,
    on_members: Callback<Group>,
    on_delete: Callback<Group>,
) -> impl IntoView {
    groups
        .into_iter()
        .map(|group| {
            let id = group.id.clone();
            let editing = Signal::derive(move || editing_id.with(|e| e.as_deref() == Some(id.as_str())));
            view! {
                <GroupItem
                    group=group
                    busy=busy
                    editing=editing
                    on_edit=on_edit
                    on_toggle=on_toggle
                    on_members=on_members
                    on_delete=on_delete
                />
            }
        })
        .collect_view()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn toggle_label_follows_active_flag() {
        let html = render_to_string(move || {
            let groups = vec![
                Group {
                    id: "g1".into(),
                    name: "Marta".into(),
                    member_count: 1,
                    is_active: true,
                    users: Vec::new(),
                },
                Group {
                    id: "g2".into(),
                    name: "María".into(),
                    member_count: 0,
                    is_active: false,
                    users: Vec::new(),
                },
            ];
            view! {
                <ul>
                    <GroupList
                        groups=groups
                        busy=Signal::derive(|| false)
                        editing_id=Signal::derive(|| None)
                        on_edit=Callback::new(|_| {})
                        on_toggle=Callback::new(|_| {})
                        on_members=Callback::new(|_| {})
                        on_delete=Callback::new(|_| {})
                    />
                </ul>
            }
        });
        assert!(html.contains("1 integrante"));
        assert!(html.contains("0 integrantes"));
        assert!(html.contains("Desactivar"));
        assert!(html.contains("Activar"));
        assert!(html.contains("Inactivo"));
    }
}
