use leptos::*;

use crate::components::common::{Button, ButtonVariant, Card};

#[component]
pub fn JoinConfirmation(
    #[prop(into)] group_name: String,
    error: Signal<Option<String>>,
    #[prop(into)] pending: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Card class="text-center space-y-3">
            <div class="text-4xl" aria-hidden="true">"⚠️"</div>
            <h3 class="text-lg font-semibold text-fg">"¿Estás segura de tu elección?"</h3>
            <p class="text-sm text-fg">
                "Estás a punto de unirte a " <strong>{group_name}</strong> "."
            </p>
            <p class="text-sm text-status-warning-text">
                "Una vez te unas a este grupo, no podrás cambiarte por tu cuenta. Solo una servidora podrá hacer cambios posteriores."
            </p>
            {move || {
                error
                    .get()
                    .map(|msg| view! { <p class="text-sm text-status-error-text" role="alert">{msg}</p> })
            }}
            <div class="flex flex-col sm:flex-row gap-2 pt-2">
                <Button
                    variant=ButtonVariant::Secondary
                    class="flex-1"
                    disabled=pending
                    on:click=move |_| on_cancel.call(())
                >
                    "Cancelar"
                </Button>
                <Button
                    variant=ButtonVariant::Primary
                    class="flex-1"
                    loading=pending
                    on:click=move |_| on_confirm.call(())
                >
                    "Sí, unirme a este grupo"
                </Button>
            </div>
        </Card>
    }
}
