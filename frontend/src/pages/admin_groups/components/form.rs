use leptos::*;

use crate::{
    components::common::{Button, ButtonVariant, Card},
    pages::admin_groups::view_model::GroupFormState,
};

#[component]
pub fn GroupForm(
    form: GroupFormState,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Card>
            <form
                class="space-y-4"
                on:submit=move |ev| {
                    ev.prevent_default();
                    on_submit.call(());
                }
            >
                <h3 class="text-lg font-semibold text-fg">
                    {move || form.mode.with(|mode| mode.title())}
                </h3>
                <div class="space-y-1">
                    <label for="group-name" class="text-sm font-medium text-fg">
                        "Nombre del grupo"
                    </label>
                    <input
                        id="group-name"
                        type="text"
                        required=true
                        placeholder="Grupo 1"
                        class="w-full rounded-xl border border-form-control-border bg-form-control-bg text-fg px-3 py-2"
                        prop:value=move || form.name.get()
                        on:input=move |ev| form.name.set(event_target_value(&ev))
                    />
                </div>
                <label class="flex items-center gap-2 text-sm text-fg">
                    <input
                        type="checkbox"
                        prop:checked=move || form.is_active.get()
                        on:change=move |ev| form.is_active.set(event_target_checked(&ev))
                    />
                    <span>"Grupo activo"</span>
                </label>
                {move || {
                    form.error
                        .get()
                        .map(|msg| view! { <p class="text-sm text-status-error-text" role="alert">{msg}</p> })
                }}
                <div class="flex justify-end gap-2">
                    <Button
                        variant=ButtonVariant::Secondary
                        disabled=pending
                        on:click=move |_| on_cancel.call(())
                    >
                        "Cancelar"
                    </Button>
                    <button
                        type="submit"
                        class=format!(
                            "inline-flex items-center justify-center rounded-xl px-4 py-2 text-sm font-semibold disabled:opacity-50 {}",
                            ButtonVariant::Primary.classes()
                        )
                        disabled=move || pending.get()
                    >
                        {move || form.mode.with(|mode| mode.submit_label())}
                    </button>
                </div>
            </form>
        </Card>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::pages::admin_groups::utils::GroupFormMode;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn edit_mode_shows_save_label() {
        let html = render_to_string(move || {
            let form = GroupFormState {
                mode: create_rw_signal(GroupFormMode::Editing("g1".into())),
                name: create_rw_signal("Marta".to_string()),
                is_active: create_rw_signal(true),
                error: create_rw_signal(Some("Ya existe un grupo con ese nombre".to_string())),
            };
            view! {
                <GroupForm
                    form=form
                    pending=Signal::derive(|| false)
                    on_submit=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Editar Grupo"));
        assert!(html.contains("Guardar Cambios"));
        assert!(html.contains("Grupo activo"));
        assert!(html.contains("Ya existe un grupo con ese nombre"));
    }
}
