use leptos::*;

use crate::{
    api::User,
    components::{
        common::{Badge, BadgeTone, Button, ButtonVariant},
        empty_state::EmptyState,
    },
};

#[component]
pub fn UserList(users: Vec<User>, on_assign: Callback<User>) -> impl IntoView {
    if users.is_empty() {
        return view! { <EmptyState title="No hay usuarias registradas." icon="👥" /> }.into_view();
    }
    let rows = users
        .into_iter()
        .map(|user| {
            let group = user.group.as_ref().map(|group| group.name.clone());
            let role = user.role.label();
            let tone = if user.is_admin() {
                BadgeTone::Warning
            } else {
                BadgeTone::Neutral
            };
            let name = user.name.clone();
            let identification = user.identification.clone();
            let flowers = user.flowers;
            let user = store_value(user);
            view! {
                <tr class="border-b border-border">
                    <td class="px-3 py-2">
                        <p class="font-medium text-fg">{name}</p>
                        <p class="text-xs font-mono text-fg-muted">{identification}</p>
                    </td>
                    <td class="px-3 py-2"><Badge tone=tone>{role}</Badge></td>
                    <td class="px-3 py-2 text-sm text-fg">{format!("{} 🌸", flowers)}</td>
                    <td class="px-3 py-2 text-sm">
                        {match group {
                            Some(name) => view! { <span class="text-fg">{name}</span> }.into_view(),
                            None => view! { <span class="text-fg-muted">"Sin grupo"</span> }.into_view(),
                        }}
                    </td>
                    <td class="px-3 py-2 text-right">
                        <Button
                            variant=ButtonVariant::Secondary
                            on:click=move |_| on_assign.call(user.get_value())
                        >
                            "Asignar grupo"
                        </Button>
                    </td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="overflow-x-auto">
            <table class="min-w-full text-left">
                <thead class="text-xs uppercase text-fg-muted">
                    <tr>
                        <th class="px-3 py-2">"Nombre"</th>
                        <th class="px-3 py-2">"Rol"</th>
                        <th class="px-3 py-2">"Flores"</th>
                        <th class="px-3 py-2">"Grupo"</th>
                        <th class="px-3 py-2"></th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
    .into_view()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{
        helpers::{admin_user, grouped_user},
        ssr::render_to_string,
    };

    #[test]
    fn shows_role_group_and_assign_action() {
        let html = render_to_string(move || {
            view! {
                <UserList
                    users=vec![admin_user(), grouped_user("g1", "Marta")]
                    on_assign=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Servidora"));
        assert!(html.contains("Sin grupo"));
        assert!(html.contains("Marta"));
        assert_eq!(html.matches("Asignar grupo").count(), 2);
    }

    #[test]
    fn empty_list_renders_empty_state() {
        let html = render_to_string(move || {
            view! { <UserList users=Vec::new() on_assign=Callback::new(|_| {}) /> }
        });
        assert!(html.contains("No hay usuarias registradas."));
    }
}
