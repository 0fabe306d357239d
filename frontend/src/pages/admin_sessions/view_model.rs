use leptos::*;

use super::utils::{QrTarget, SessionFormState};
use crate::{
    api::{ApiError, CreateSessionRequest, CreatedSession, DeactivateSessionResponse, Session, SessionQr},
    components::layout::{clear_flash_after, FLASH_MILLIS},
    state::{
        queries::{use_create_session, use_deactivate_session, use_session_qr, use_sessions},
        query::Query,
    },
};

#[derive(Clone, Copy)]
pub struct AdminSessionsViewModel {
    pub sessions: Query<Vec<Session>>,
    pub form: SessionFormState,
    pub form_error: RwSignal<Option<String>>,
    pub create_action: Action<CreateSessionRequest, Result<CreatedSession, ApiError>>,
    pub deactivate_action: Action<String, Result<DeactivateSessionResponse, ApiError>>,
    pub pending_deactivate: RwSignal<Option<String>>,
    pub action_error: RwSignal<Option<ApiError>>,
    pub flash: RwSignal<Option<String>>,
    pub qr_target: RwSignal<Option<QrTarget>>,
    pub qr: Query<SessionQr>,
}

impl AdminSessionsViewModel {
    pub fn submit(&self) {
        if self.create_action.pending().get_untracked() {
            return;
        }
        match self.form.to_request() {
            Ok(request) => {
                self.form_error.set(None);
                self.create_action.dispatch(request);
            }
            Err(msg) => self.form_error.set(Some(msg)),
        }
    }

    pub fn show_qr(&self, session: &Session) {
        self.qr_target.set(Some(QrTarget::from_session(session)));
    }

    pub fn close_qr(&self) {
        self.qr_target.set(None);
    }

    pub fn ask_deactivate(&self, id: String) {
        self.pending_deactivate.set(Some(id));
    }

    pub fn cancel_deactivate(&self) {
        self.pending_deactivate.set(None);
    }

    pub fn confirm_deactivate(&self) {
        if let Some(id) = self.pending_deactivate.get_untracked() {
            self.action_error.set(None);
            self.deactivate_action.dispatch(id);
        }
        self.pending_deactivate.set(None);
    }

    /// Image source for the open QR modal, once known.
    pub fn qr_code(&self) -> Option<String> {
        let target = self.qr_target.get()?;
        if !target.needs_fetch() {
            return target.qr_code;
        }
        self.qr.data().map(|qr| qr.qr_code)
    }
}

pub fn use_admin_sessions_view_model() -> AdminSessionsViewModel {
    let qr_target = create_rw_signal(None::<QrTarget>);
    let qr_lookup = Signal::derive(move || {
        qr_target
            .get()
            .filter(QrTarget::needs_fetch)
            .map(|target| target.session_id)
    });

    let vm = AdminSessionsViewModel {
        sessions: use_sessions(),
        form: SessionFormState::default(),
        form_error: create_rw_signal(None),
        create_action: use_create_session(),
        deactivate_action: use_deactivate_session(),
        pending_deactivate: create_rw_signal(None),
        action_error: create_rw_signal(None),
        flash: create_rw_signal(None),
        qr_target,
        qr: use_session_qr(qr_lookup),
    };

    let create_action = vm.create_action;
    create_effect(move |_| match create_action.value().get() {
        Some(Ok(created)) => {
            vm.form.reset();
            vm.form_error.set(None);
            vm.qr_target.set(Some(QrTarget::from_created(&created)));
        }
        Some(Err(err)) => vm.form_error.set(Some(err.message)),
        None => {}
    });

    let deactivate_action = vm.deactivate_action;
    create_effect(move |_| match deactivate_action.value().get() {
        Some(Ok(response)) => {
            let message = if response.message.is_empty() {
                "Sesión desactivada".to_string()
            } else {
                response.message
            };
            vm.flash.set(Some(message));
            clear_flash_after(vm.flash, FLASH_MILLIS);
        }
        Some(Err(err)) => vm.action_error.set(Some(err)),
        None => {}
    });

    vm
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;
    use chrono::{TimeZone, Utc};

    #[test]
    fn invalid_form_never_dispatches() {
        with_runtime(|| {
            let vm = use_admin_sessions_view_model();
            vm.form.name.set("ab".into());
            vm.submit();
            assert_eq!(
                vm.form_error.get().as_deref(),
                Some("El nombre debe tener al menos 3 caracteres")
            );
            assert_eq!(vm.create_action.version().get(), 0);
        });
    }

    #[test]
    fn listed_session_qr_waits_for_fetch() {
        with_runtime(|| {
            let vm = use_admin_sessions_view_model();
            let session = Session {
                id: "s1".into(),
                session_id: "EMA-01".into(),
                name: "Retiro".into(),
                starts_at: Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).unwrap(),
                ends_at: Utc.with_ymd_and_hms(2026, 3, 1, 16, 0, 0).unwrap(),
                is_active: true,
                session_pin: None,
                created_at: None,
            };
            vm.show_qr(&session);
            assert_eq!(vm.qr_target.get().map(|t| t.session_id).as_deref(), Some("EMA-01"));
            assert_eq!(vm.qr_code(), None);
            vm.close_qr();
            assert_eq!(vm.qr_target.get(), None);
        });
    }

    #[test]
    fn cancelled_deactivation_keeps_session() {
        with_runtime(|| {
            let vm = use_admin_sessions_view_model();
            vm.ask_deactivate("s1".into());
            vm.cancel_deactivate();
            vm.confirm_deactivate();
            assert_eq!(vm.deactivate_action.version().get(), 0);
        });
    }
}
