use leptos::*;

use super::{
    components::{
        assign_modal::AssignGroupModal, bulk_form::BulkUserForm, csv_upload::CsvUpload,
        import_result::ImportResult, list::UserList,
    },
    utils::UsersTab,
    view_model::use_admin_users_view_model,
};
use crate::{
    api::ApiError,
    components::{
        common::Card,
        error::InlineErrorMessage,
        layout::{ErrorMessage, Layout, LoadingSpinner, SuccessMessage},
    },
    state::query::QueryState,
};

fn labelled(prefix: &str, error: Option<ApiError>) -> Option<ApiError> {
    error.map(|mut err| {
        err.message = format!("{}: {}", prefix, err.message);
        err
    })
}

#[component]
fn CsvFormatHelp() -> impl IntoView {
    view! {
        <Card class="bg-surface-muted">
            <h3 class="font-semibold text-fg">"Formato del archivo CSV"</h3>
            <p class="text-sm text-fg-muted">
                "La primera fila debe contener las columnas: "
                <code class="font-mono">"name, identification, role"</code>
            </p>
            <pre class="mt-2 rounded-lg bg-surface-elevated p-3 text-xs font-mono text-fg overflow-x-auto">
                "name,identification,role\nAna Gómez,1001,user\nMarta Ruiz,1002,admin"
            </pre>
            <p class="mt-2 text-xs text-fg-muted">
                "El rol puede ser \"user\" o \"admin\". Si se omite se usa \"user\". Las identificaciones existentes se actualizan."
            </p>
        </Card>
    }
}

#[component]
pub fn AdminUsersPanel() -> impl IntoView {
    let vm = use_admin_users_view_model();
    let bulk_pending = Signal::derive(move || vm.bulk_action.pending().get());
    let csv_pending =
        Signal::derive(move || vm.csv_action.pending().get() || vm.csv.reading.get());
    let assigning = Signal::derive(move || vm.assign_action.pending().get());
    let bulk_error = Signal::derive(move || labelled("Error al crear usuarios", vm.bulk_error.get()));
    let csv_error =
        Signal::derive(move || labelled("Error al importar CSV", vm.csv_upload_error.get()));

    let tabs = UsersTab::ALL
        .iter()
        .copied()
        .map(|tab| {
            view! {
                <button
                    type="button"
                    class=move || {
                        if vm.tab.get() == tab {
                            "px-4 py-2 text-sm font-semibold border-b-2 border-action-primary-bg text-fg"
                        } else {
                            "px-4 py-2 text-sm text-fg-muted hover:text-fg"
                        }
                    }
                    on:click=move |_| vm.tab.set(tab)
                >
                    {tab.label()}
                </button>
            }
        })
        .collect_view();

    view! {
        <Layout>
            <div class="space-y-6">
                <header>
                    <h1 class="text-2xl font-bold text-fg">"Gestión de Usuarios"</h1>
                    <p class="text-sm text-fg-muted">"Crear usuarios de forma individual o masiva"</p>
                </header>
                {move || vm.flash.get().map(|msg| view! { <SuccessMessage message=msg /> })}
                <InlineErrorMessage error=bulk_error />
                <InlineErrorMessage error=csv_error />
                <nav class="flex gap-2 border-b border-border">{tabs}</nav>
                {move || match vm.tab.get() {
                    UsersTab::Form => view! {
                        <Card>
                            <h2 class="text-lg font-semibold text-fg mb-4">"Crear Nuevos Usuarios"</h2>
                            <BulkUserForm
                                rows=vm.rows
                                pending=bulk_pending
                                on_add=Callback::new(move |_| vm.add_row())
                                on_remove=Callback::new(move |key| vm.remove_row(key))
                                on_submit=Callback::new(move |_| vm.submit_bulk())
                            />
                        </Card>
                    }
                    .into_view(),
                    UsersTab::Csv => view! {
                        <Card>
                            <h2 class="text-lg font-semibold text-fg mb-4">"Importar desde CSV"</h2>
                            <CsvUpload
                                selected=vm.csv.selected.into()
                                error=vm.csv.error.into()
                                pending=csv_pending
                                on_select=Callback::new(move |(name, size, file)| vm.select_csv(name, size, file))
                                on_upload=Callback::new(move |_| vm.upload_csv())
                                on_reset=Callback::new(move |_| vm.clear_csv())
                            />
                        </Card>
                        <CsvFormatHelp />
                    }
                    .into_view(),
                    UsersTab::Users => view! {
                        <Card>
                            {move || match vm.users.state() {
                                QueryState::Ready(users) => view! {
                                    <UserList
                                        users=users
                                        on_assign=Callback::new(move |user| vm.open_assign(user))
                                    />
                                }
                                .into_view(),
                                QueryState::Failed(_) => {
                                    view! { <ErrorMessage message="Error al cargar las usuarias" /> }.into_view()
                                }
                                _ => view! { <LoadingSpinner label="Cargando usuarias..." /> }.into_view(),
                            }}
                        </Card>
                    }
                    .into_view(),
                }}
                {move || vm.result.get().map(|summary| view! { <ImportResult summary=summary /> })}
            </div>
            <AssignGroupModal
                state=vm.assign
                groups=vm.groups
                history=vm.history
                pending=assigning
                on_submit=Callback::new(move |_| vm.submit_assign())
                on_close=Callback::new(move |_| vm.close_assign())
            />
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::ApiErrorKind;
    use crate::test_support::{helpers::admin_user, ssr::render_as};

    #[test]
    fn opens_on_bulk_form_tab() {
        let html = render_as(Some(admin_user()), || view! { <AdminUsersPanel /> });
        assert!(html.contains("Gestión de Usuarios"));
        assert!(html.contains("📝 Formulario"));
        assert!(html.contains("📄 Importar CSV"));
        assert!(html.contains("Crear Nuevos Usuarios"));
        assert!(!html.contains("Asignar Grupo de Trabajo"));
    }

    #[test]
    fn action_errors_carry_their_context() {
        let err = ApiError {
            kind: ApiErrorKind::Server,
            status: Some(500),
            message: "fallo".into(),
        };
        let labelled = labelled("Error al importar CSV", Some(err)).map(|e| e.message);
        assert_eq!(labelled.as_deref(), Some("Error al importar CSV: fallo"));
        assert!(super::labelled("x", None).is_none());
    }
}
