use leptos::*;

use super::{
    components::{confirmation::JoinConfirmation, current::CurrentGroupCard, picker::GroupPicker},
    utils::group_name,
    view_model::use_my_group_view_model,
};
use crate::{
    components::{
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner},
    },
    state::query::QueryState,
};

#[component]
pub fn MyGroupPanel() -> impl IntoView {
    let vm = use_my_group_view_model();
    let pending = Signal::derive(move || vm.join_action.pending().get());
    let load_error = Signal::derive(move || match (vm.my_group.state(), vm.groups.state()) {
        (QueryState::Failed(err), _) | (_, QueryState::Failed(err)) => Some(err),
        _ => None,
    });
    let loading = Signal::derive(move || {
        matches!(vm.my_group.state(), QueryState::Loading)
            || matches!(vm.groups.state(), QueryState::Loading)
    });

    view! {
        <Layout>
            <div class="max-w-2xl mx-auto space-y-6">
                <header class="text-center space-y-1">
                    <h1 class="text-3xl font-bold text-fg">"Mi Grupo de Trabajo"</h1>
                    <p class="text-sm text-fg-muted">
                        "Los grupos nos ayudan a organizarnos y servir mejor a la comunidad"
                    </p>
                </header>
                <InlineErrorMessage error=load_error />
                {move || {
                    if loading.get() {
                        return view! { <LoadingSpinner label="Cargando..." /> }.into_view();
                    }
                    let membership = vm.my_group.data().unwrap_or_default();
                    if membership.has_group() {
                        return membership
                            .group
                            .map(|group| view! { <CurrentGroupCard group=group /> })
                            .into_view();
                    }
                    let groups = vm.groups.data().unwrap_or_default();
                    match vm.selected.get() {
                        Some(id) => {
                            let name = group_name(&groups, &id).unwrap_or_default();
                            view! {
                                <JoinConfirmation
                                    group_name=name
                                    error=vm.error.into()
                                    pending=pending
                                    on_confirm=Callback::new(move |_| vm.confirm())
                                    on_cancel=Callback::new(move |_| vm.cancel())
                                />
                            }
                            .into_view()
                        }
                        None => view! {
                            <GroupPicker
                                groups=groups
                                pending=pending
                                on_select=Callback::new(move |id| vm.select(id))
                            />
                        }
                        .into_view(),
                    }
                }}
            </div>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::regular_user, ssr::render_as};

    #[test]
    fn renders_header_while_loading() {
        let html = render_as(Some(regular_user()), || view! { <MyGroupPanel /> });
        assert!(html.contains("Mi Grupo de Trabajo"));
        assert!(html.contains("Cargando..."));
    }
}
