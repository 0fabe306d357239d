use leptos::*;
use uuid::Uuid;

use crate::{
    api::Role,
    components::common::{Button, ButtonVariant},
    pages::admin_users::utils::{complete_count, BulkRow},
};

const INPUT_CLASS: &str =
    "w-full rounded-xl border border-form-control-border bg-form-control-bg text-fg px-3 py-2";

#[component]
fn BulkRowCard(
    index: usize,
    row: BulkRow,
    #[prop(into)] removable: Signal<bool>,
    on_edit: Callback<(Uuid, BulkRow)>,
    on_remove: Callback<Uuid>,
) -> impl IntoView {
    let key = row.key;
    let current = store_value(row);
    let edit = move |change: &dyn Fn(&mut BulkRow)| {
        let mut next = current.get_value();
        change(&mut next);
        current.set_value(next.clone());
        on_edit.call((key, next));
    };
    let name_id = format!("name-{}", key);
    let ident_id = format!("identification-{}", key);
    let role_id = format!("role-{}", key);

    view! {
        <div class="rounded-xl border border-border p-4 space-y-3">
            <div class="flex items-center justify-between">
                <h4 class="font-medium text-fg">{format!("Usuario {}", index + 1)}</h4>
                <Show when=move || removable.get()>
                    <Button variant=ButtonVariant::Ghost on:click=move |_| on_remove.call(key)>
                        "Eliminar"
                    </Button>
                </Show>
            </div>
            <div class="grid gap-3 md:grid-cols-3">
                <div class="space-y-1">
                    <label for=name_id.clone() class="block text-sm text-fg">"Nombre completo"</label>
                    <input
                        id=name_id
                        type="text"
                        class=INPUT_CLASS
                        placeholder="María García"
                        prop:value=current.with_value(|row| row.name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit(&move |row: &mut BulkRow| row.name = value.clone());
                        }
                    />
                </div>
                <div class="space-y-1">
                    <label for=ident_id.clone() class="block text-sm text-fg">"Identificación"</label>
                    <input
                        id=ident_id
                        type="text"
                        inputmode="numeric"
                        class=INPUT_CLASS
                        placeholder="1020304050"
                        prop:value=current.with_value(|row| row.identification.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit(&move |row: &mut BulkRow| row.identification = value.clone());
                        }
                    />
                </div>
                <div class="space-y-1">
                    <label for=role_id.clone() class="block text-sm text-fg">"Rol"</label>
                    <select
                        id=role_id
                        class=INPUT_CLASS
                        prop:value=current.with_value(|row| row.role.as_str())
                        on:change=move |ev| {
                            let role = Role::parse(&event_target_value(&ev)).unwrap_or_default();
                            edit(&move |row: &mut BulkRow| row.role = role);
                        }
                    >
                        <option value="user">"Participante"</option>
                        <option value="admin">"Servidora"</option>
                    </select>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn BulkUserForm(
    rows: RwSignal<Vec<BulkRow>>,
    #[prop(into)] pending: Signal<bool>,
    on_add: Callback<()>,
    on_remove: Callback<Uuid>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let ready = create_memo(move |_| rows.with(|rows| complete_count(rows)));
    let removable = Signal::derive(move || rows.with(|rows| rows.len() > 1));
    let on_edit = Callback::new(move |(key, next): (Uuid, BulkRow)| {
        rows.update(|rows| {
            if let Some(row) = rows.iter_mut().find(|row| row.key == key) {
                *row = next;
            }
        });
    });

    view! {
        <form
            class="space-y-4"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.call(());
            }
        >
            <For
                each=move || rows.get().into_iter().enumerate()
                key=|(index, row)| (*index, row.key)
                children=move |(index, row)| {
                    view! {
                        <BulkRowCard
                            index=index
                            row=row
                            removable=removable
                            on_edit=on_edit
                            on_remove=on_remove
                        />
                    }
                }
            />
            <div class="flex flex-col sm:flex-row gap-2 justify-between">
                <Button
                    variant=ButtonVariant::Secondary
                    disabled=pending
                    on:click=move |_| on_add.call(())
                >
                    "+ Agregar otro usuario"
                </Button>
                <button
                    type="submit"
                    class=format!(
                        "inline-flex items-center justify-center rounded-xl px-4 py-2 text-sm font-semibold disabled:opacity-50 {}",
                        ButtonVariant::Primary.classes()
                    )
                    disabled=move || pending.get() || ready.get() == 0
                >
                    {move || format!("Crear {} usuario(s)", ready.get())}
                </button>
            </div>
        </form>
    }
}
