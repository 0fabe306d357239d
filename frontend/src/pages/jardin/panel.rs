use leptos::*;

use super::components::entry::LeaderboardView;
use crate::{
    components::{
        common::{Button, ButtonVariant, Card},
        layout::{Layout, LoadingSpinner},
    },
    router::SCANNER_PATH,
    state::{
        auth::use_logout,
        queries::{use_current_user, use_leaderboard},
        query::QueryState,
    },
};

#[component]
pub fn JardinPanel() -> impl IntoView {
    let leaderboard = use_leaderboard();
    let current_user = use_current_user();
    let user_id = Signal::derive(move || current_user.get().map(|user| user.id));
    let logout = use_logout();

    view! {
        <Layout>
            <div class="max-w-2xl mx-auto space-y-6">
                <header class="text-center space-y-1">
                    <h1 class="text-3xl font-bold text-fg">"Jardín de Emaús"</h1>
                    <p class="text-sm text-fg-muted">
                        "Reconocimiento a la constancia y presencia de nuestra comunidad"
                    </p>
                </header>
                {move || match leaderboard.state() {
                    QueryState::Loading | QueryState::Disabled => {
                        view! { <LoadingSpinner label="Cargando jardín..." /> }.into_view()
                    }
                    QueryState::Failed(_) => view! {
                        <Card>
                            <p class="text-status-error-text mb-4">"Error al cargar el jardín"</p>
                            <div class="flex items-center gap-4">
                                <Button variant=ButtonVariant::Secondary on:click=move |_| leaderboard.refetch()>
                                    "Reintentar"
                                </Button>
                                <a href=SCANNER_PATH class="text-sm text-fg-muted hover:text-fg">"Volver"</a>
                            </div>
                        </Card>
                    }
                    .into_view(),
                    QueryState::Ready(board) => match user_id.get() {
                        Some(id) => view! { <LeaderboardView board=board user_id=id /> }.into_view(),
                        None => view! { <LeaderboardView board=board /> }.into_view(),
                    },
                }}
                <div class="flex flex-col gap-2">
                    <a
                        href=SCANNER_PATH
                        class=format!(
                            "inline-flex items-center justify-center rounded-xl px-4 py-3 text-sm font-semibold {}",
                            ButtonVariant::Primary.classes()
                        )
                    >
                        "Registrar Asistencia"
                    </a>
                    <Button variant=ButtonVariant::Ghost on:click=move |_| logout.call(())>
                        "Cerrar Sesión"
                    </Button>
                </div>
            </div>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::regular_user, ssr::render_as};

    #[test]
    fn shows_loading_until_leaderboard_arrives() {
        let html = render_as(Some(regular_user()), || view! { <JardinPanel /> });
        assert!(html.contains("Jardín de Emaús"));
        assert!(html.contains("Cargando jardín..."));
        assert!(html.contains("Registrar Asistencia"));
    }
}
