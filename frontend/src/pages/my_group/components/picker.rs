use leptos::*;

use crate::{
    api::Group,
    components::{
        common::{Badge, Card},
        empty_state::EmptyState,
    },
    pages::my_group::utils::{is_selectable, member_count_label},
};

#[component]
pub fn GroupPicker(
    groups: Vec<Group>,
    #[prop(into)] pending: Signal<bool>,
    on_select: Callback<String>,
) -> impl IntoView {
    let empty = groups.is_empty();
    let options = groups
        .into_iter()
        .map(|group| {
            let Group {
                id,
                name,
                member_count,
                is_active,
                ..
            } = group;
            view! {
                <li>
                    <button
                        type="button"
                        class="w-full text-left rounded-xl border border-border bg-surface-elevated px-4 py-3 hover:border-action-primary-bg disabled:opacity-50 disabled:cursor-not-allowed"
                        disabled=move || !is_selectable(is_active, pending.get())
                        on:click=move |_| on_select.call(id.clone())
                    >
                        <div class="flex items-center justify-between gap-2">
                            <h4 class="font-medium text-fg">{name}</h4>
                            {(!is_active).then(|| view! { <Badge>"Inactivo"</Badge> })}
                        </div>
                        <span class="text-sm text-fg-muted">{member_count_label(member_count)}</span>
                    </button>
                </li>
            }
        })
        .collect_view();

    view! {
        <Card>
            <h3 class="text-lg font-semibold text-fg">"Selecciona tu Grupo de Trabajo"</h3>
            <p class="text-sm text-fg-muted mb-4">
                "Una vez elijas un grupo, esta decisión será permanente."
            </p>
            {if empty {
                view! { <EmptyState title="No hay grupos disponibles en este momento." /> }.into_view()
            } else {
                view! { <ul class="grid gap-3 sm:grid-cols-2">{options}</ul> }.into_view()
            }}
        </Card>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    fn group(id: &str, name: &str, members: u32, active: bool) -> Group {
        Group {
            id: id.into(),
            name: name.into(),
            member_count: members,
            is_active: active,
            users: Vec::new(),
        }
    }

    #[test]
    fn lists_groups_with_counts_and_inactive_badge() {
        let html = render_to_string(move || {
            let groups = vec![group("g1", "Marta", 1, true), group("g2", "María", 4, false)];
            view! {
                <GroupPicker groups=groups pending=Signal::derive(|| false) on_select=Callback::new(|_| {}) />
            }
        });
        assert!(html.contains("1 miembro"));
        assert!(html.contains("4 miembros"));
        assert!(html.contains("Inactivo"));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn empty_list_explains_itself() {
        let html = render_to_string(move || {
            view! {
                <GroupPicker groups=Vec::new() pending=Signal::derive(|| false) on_select=Callback::new(|_| {}) />
            }
        });
        assert!(html.contains("No hay grupos disponibles"));
    }
}
