use leptos::*;

use crate::{
    api::Session,
    components::common::{Badge, BadgeTone, Button, ButtonVariant},
    pages::admin_sessions::utils::active_label,
    utils::time::format_datetime_es,
};

#[component]
pub fn SessionItem(
    session: Session,
    on_show_qr: Callback<Session>,
    on_deactivate: Callback<String>,
    #[prop(into)] deactivating: Signal<bool>,
) -> impl IntoView {
    let tone = if session.is_active {
        BadgeTone::Success
    } else {
        BadgeTone::Neutral
    };
    let id = session.id.clone();
    let is_active = session.is_active;
    let pin = session.session_pin.clone();
    let starts = format_datetime_es(&session.starts_at);
    let ends = format_datetime_es(&session.ends_at);
    let name = session.name.clone();
    let code = session.session_id.clone();
    let session = store_value(session);

    view! {
        <li class="rounded-xl border border-border bg-surface-elevated p-4 space-y-3">
            <div class="flex items-start justify-between gap-3">
                <div>
                    <h3 class="font-semibold text-fg">{name}</h3>
                    <p class="text-xs font-mono text-fg-muted">{code}</p>
                </div>
                <Badge tone=tone>{active_label(is_active)}</Badge>
            </div>
            <dl class="grid grid-cols-2 gap-2 text-sm">
                <div>
                    <dt class="text-fg-muted">"Inicio:"</dt>
                    <dd class="text-fg">{starts}</dd>
                </div>
                <div>
                    <dt class="text-fg-muted">"Fin:"</dt>
                    <dd class="text-fg">{ends}</dd>
                </div>
                {pin.map(|pin| view! {
                    <div>
                        <dt class="text-fg-muted">"PIN:"</dt>
                        <dd class="font-mono text-fg">{pin}</dd>
                    </div>
                })}
            </dl>
            <div class="flex gap-2">
                <Button
                    variant=ButtonVariant::Primary
                    on:click=move |_| on_show_qr.call(session.get_value())
                >
                    "Ver QR"
                </Button>
                {is_active.then(|| view! {
                    <Button
                        variant=ButtonVariant::Secondary
                        loading=deactivating
                        on:click=move |_| on_deactivate.call(id.clone())
                    >
                        "Desactivar"
                    </Button>
                })}
            </div>
        </li>
    }
}

#[component]
pub fn SessionList(
    sessions: Vec<Session>,
    on_show_qr: Callback<Session>,
    on_deactivate: Callback<String>,
    #[prop(into)] deactivating: Signal<bool>,
) -> impl IntoView {
    sessions
        .into_iter()
        .map(|session| {
            view! {
                <SessionItem
                    session=session
                    on_show_qr=on_show_qr
                    on_deactivate=on_deactivate
                    deactivating=deactivating
                />
            }
        })
        .collect_view()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use chrono::{TimeZone, Utc};

    fn session(id: &str, active: bool) -> Session {
        Session {
            id: id.into(),
            session_id: format!("EMA-{}", id),
            name: format!("Encuentro {}", id),
            starts_at: Utc.with_ymd_and_hms(2026, 3, 7, 13, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2026, 3, 7, 15, 0, 0).unwrap(),
            is_active: active,
            session_pin: Some("4821".into()),
            created_at: None,
        }
    }

    #[test]
    fn only_active_sessions_offer_deactivation() {
        let html = render_to_string(move || {
            view! {
                <ul>
                    <SessionList
                        sessions=vec![session("1", true), session("2", false)]
                        on_show_qr=Callback::new(|_| {})
                        on_deactivate=Callback::new(|_| {})
                        deactivating=Signal::derive(|| false)
                    />
                </ul>
            }
        });
        assert!(html.contains("Activa"));
        assert!(html.contains("Inactiva"));
        assert!(html.contains("EMA-1"));
        assert!(html.contains("4821"));
        assert_eq!(html.matches("Desactivar").count(), 1);
        assert_eq!(html.matches("Ver QR").count(), 2);
    }
}
