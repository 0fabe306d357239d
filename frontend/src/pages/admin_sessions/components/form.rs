use leptos::*;

use crate::{
    components::common::{ButtonVariant, Card},
    pages::admin_sessions::utils::{SessionFormState, NAME_MAX_CHARS},
    utils::time::today_in_app_tz,
};

const INPUT_CLASS: &str =
    "w-full rounded-xl border border-form-control-border bg-form-control-bg text-fg px-3 py-2 disabled:opacity-50";

#[component]
fn Field(
    id: &'static str,
    label: &'static str,
    input_type: &'static str,
    value: RwSignal<String>,
    #[prop(into)] min: Signal<String>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="space-y-1">
            <label for=id class="block text-sm font-medium text-fg">{label}</label>
            <input
                id=id
                type=input_type
                class=INPUT_CLASS
                min=move || min.get()
                step=(input_type == "time").then_some("300")
                required=true
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn SessionForm(
    form: SessionFormState,
    error: Signal<Option<String>>,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let today = today_in_app_tz().format("%Y-%m-%d").to_string();
    let end_min = {
        let today = today.clone();
        Signal::derive(move || {
            let start = form.start_date.get();
            if start.is_empty() {
                today.clone()
            } else {
                start
            }
        })
    };
    let today = Signal::derive(move || today.clone());
    let no_min = Signal::derive(String::new);

    view! {
        <Card>
            <form
                class="space-y-4"
                on:submit=move |ev| {
                    ev.prevent_default();
                    on_submit.call(());
                }
            >
                <h3 class="text-lg font-semibold text-fg">"Nueva Sesión"</h3>
                <div class="space-y-1">
                    <label for="session-name" class="block text-sm font-medium text-fg">
                        "Nombre de la sesión"
                    </label>
                    <input
                        id="session-name"
                        type="text"
                        class=INPUT_CLASS
                        placeholder="Ej: Encuentro Semanal - Febrero"
                        maxlength=NAME_MAX_CHARS.to_string()
                        required=true
                        disabled=move || pending.get()
                        prop:value=move || form.name.get()
                        on:input=move |ev| form.name.set(event_target_value(&ev))
                    />
                </div>
                <div class="grid gap-4 sm:grid-cols-2">
                    <Field id="start-date" label="Fecha de inicio" input_type="date" value=form.start_date min=today disabled=pending />
                    <Field id="start-time" label="Hora de inicio" input_type="time" value=form.start_time min=no_min disabled=pending />
                    <Field id="end-date" label="Fecha de fin" input_type="date" value=form.end_date min=end_min disabled=pending />
                    <Field id="end-time" label="Hora de fin" input_type="time" value=form.end_time min=no_min disabled=pending />
                </div>
                {move || {
                    error
                        .get()
                        .map(|msg| view! { <p class="text-sm text-status-error-text" role="alert">{msg}</p> })
                }}
                <button
                    type="submit"
                    class=format!(
                        "w-full inline-flex items-center justify-center rounded-xl px-4 py-3 text-sm font-semibold disabled:opacity-50 {}",
                        ButtonVariant::Primary.classes()
                    )
                    disabled=move || pending.get()
                >
                    {move || if pending.get() { "Creando..." } else { "Crear Sesión" }}
                </button>
            </form>
        </Card>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_fields_and_error() {
        let html = render_to_string(move || {
            let form = SessionFormState::default();
            form.name.set("Retiro".into());
            view! {
                <SessionForm
                    form=form
                    error=Signal::derive(|| Some("La fecha y hora de inicio son requeridas".to_string()))
                    pending=Signal::derive(|| false)
                    on_submit=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Nueva Sesión"));
        assert!(html.contains("Fecha de inicio"));
        assert!(html.contains("Hora de fin"));
        assert!(html.contains("maxlength=\"100\""));
        assert!(html.contains("La fecha y hora de inicio son requeridas"));
        assert!(html.contains("Crear Sesión"));
    }
}
