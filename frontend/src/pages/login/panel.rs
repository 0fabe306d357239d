use crate::pages::login::{components::form::LoginForm, view_model::use_login_view_model};
use leptos::*;

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let pending = vm.login_action.pending();

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4">
            <div class="max-w-md w-full space-y-8">
                <div class="text-center">
                    <div class="text-5xl" aria-hidden="true">"✝️🦋"</div>
                    <h1 class="mt-4 text-3xl font-extrabold text-fg">"Emaús Mujeres"</h1>
                    <p class="mt-2 text-sm text-fg-muted">
                        "Bienvenida. Ingresa para registrar tu asistencia."
                    </p>
                </div>
                <LoginForm
                    identification=vm.form.identification
                    error=vm.error.into()
                    pending=pending.into()
                    on_submit=Callback::new(move |_| vm.submit())
                />
                <p class="text-center text-sm text-fg-muted">
                    "Tu presencia y constancia son un regalo para la comunidad 🌸"
                </p>
            </div>
        </div>
    }
}
