use leptos::*;

use crate::{
    api::{Group, GroupUser},
    components::{
        common::{Badge, BadgeTone},
        modal::Modal,
    },
};

#[component]
fn MemberRows(users: Vec<GroupUser>) -> impl IntoView {
    if users.is_empty() {
        return view! { <p class="text-sm text-fg-muted">"No hay integrantes en este grupo."</p> }
            .into_view();
    }
    view! {
        <ul class="divide-y divide-border">
            {users
                .into_iter()
                .map(|user| view! {
                    <li class="flex items-center justify-between py-2">
                        <span class="text-fg">{user.name}</span>
                        <Badge tone=BadgeTone::Warning>{format!("{} 🌸", user.flowers)}</Badge>
                    </li>
                })
                .collect_view()}
        </ul>
    }
    .into_view()
}

#[component]
pub fn MembersModal(group: Signal<Option<Group>>, on_close: Callback<()>) -> impl IntoView {
    let is_open = Signal::derive(move || group.with(Option::is_some));
    let title = Signal::derive(move || {
        group
            .with(|group| group.as_ref().map(|g| format!("Integrantes de {}", g.name)))
            .unwrap_or_default()
    });

    view! {
        <Modal is_open=is_open title=title on_close=on_close>
            {move || group.get().map(|group| view! { <MemberRows users=group.users /> })}
        </Modal>
    }
}
