use std::rc::Rc;

use leptos::*;

use super::utils::apply_scan_to_user;
use crate::{
    api::{ApiClient, ApiError, AttendanceScanResult, ScanRequest},
    scanner::{
        platform_camera, validate_pin, Camera, CameraStream, ScanMachine, ScanOutcome,
        SubscriptionId, READER_ELEMENT_ID,
    },
    state::{
        auth::{use_auth, AuthState},
        queries::use_scan_attendance,
    },
};

const PIN_BUSY_MESSAGE: &str = "Espera a que termine el registro en curso";

/// Outcome of a finished scan request given the total known before it.
pub fn outcome_for(
    previous: Option<u32>,
    result: &Result<AttendanceScanResult, ApiError>,
) -> ScanOutcome {
    match result {
        Ok(response) => ScanOutcome::from_response(previous, response),
        Err(err) => ScanOutcome::from_error(err),
    }
}

#[derive(Clone, Copy)]
pub struct PinState {
    pub open: RwSignal<bool>,
    pub value: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
}

impl PinState {
    fn new() -> Self {
        Self {
            open: create_rw_signal(false),
            value: create_rw_signal(String::new()),
            error: create_rw_signal(None),
        }
    }

    pub fn reset(&self) {
        self.open.set(false);
        self.value.set(String::new());
        self.error.set(None);
    }
}

#[derive(Clone, Copy)]
pub struct ScannerViewModel {
    pub machine: RwSignal<ScanMachine>,
    pub pin: PinState,
    pub scan_action: Action<ScanRequest, Result<AttendanceScanResult, ApiError>>,
    camera: StoredValue<Rc<dyn Camera>>,
    stream: StoredValue<Option<CameraStream>>,
    previous_flowers: StoredValue<Option<u32>>,
    auth: ReadSignal<AuthState>,
}

impl ScannerViewModel {
    pub fn start_camera(&self) {
        let id = match self.machine.try_update(|machine| machine.begin()) {
            Some(Ok(id)) => id,
            Some(Err(err)) => {
                log::warn!("camera not started: {}", err);
                return;
            }
            None => return,
        };
        let vm = *self;
        let on_decode = Rc::new(move |code: String| vm.on_decode(id, code));
        let opening = self.camera.with_value(|camera| camera.open(READER_ELEMENT_ID, on_decode));
        spawn_local(async move {
            match opening.await {
                Ok(stream) => vm.attach_stream(id, stream),
                Err(err) => {
                    log::warn!("camera failed: {:?}", err);
                    vm.machine
                        .update(|machine| {
                            machine.fail_camera(id, &err.to_string());
                        });
                }
            }
        });
    }

    fn attach_stream(&self, id: SubscriptionId, stream: CameraStream) {
        let still_wanted = self
            .machine
            .try_with_untracked(|machine| machine.subscription() == Some(id))
            .unwrap_or(false);
        if still_wanted {
            self.stream.set_value(Some(stream));
        } else {
            stream.stop();
        }
    }

    fn on_decode(&self, id: SubscriptionId, code: String) {
        let accepted = self
            .machine
            .try_update(|machine| machine.accept_decode(id, &code))
            .flatten();
        if let Some(code) = accepted {
            self.release_camera();
            self.submit(ScanRequest::QrCode(code));
        }
    }

    fn release_camera(&self) {
        self.stream.update_value(|stream| {
            if let Some(stream) = stream.take() {
                stream.stop();
            }
        });
    }

    fn submit(&self, request: ScanRequest) {
        let previous = self
            .auth
            .with_untracked(|state| state.user.as_ref().map(|user| user.flowers));
        self.previous_flowers.set_value(previous);
        self.scan_action.dispatch(request);
    }

    pub fn cancel(&self) {
        self.machine.update(|machine| machine.cancel());
        self.release_camera();
    }

    pub fn reset(&self) {
        self.release_camera();
        self.machine.update(|machine| machine.reset());
    }

    pub fn open_pin(&self) {
        self.pin.reset();
        self.pin.open.set(true);
    }

    pub fn submit_pin(&self) {
        let pin = match validate_pin(&self.pin.value.get_untracked()) {
            Ok(pin) => pin,
            Err(msg) => {
                self.pin.error.set(Some(msg));
                return;
            }
        };
        match self.machine.try_update(|machine| machine.begin_pin()) {
            Some(Ok(())) => {
                self.release_camera();
                self.pin.reset();
                self.submit(ScanRequest::SessionPin(pin));
            }
            Some(Err(err)) => {
                log::debug!("pin rejected: {}", err);
                self.pin.error.set(Some(PIN_BUSY_MESSAGE.to_string()));
            }
            None => {}
        }
    }
}

pub fn use_scanner_view_model() -> ScannerViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let (auth, set_auth) = use_auth();
    let vm = ScannerViewModel {
        machine: create_rw_signal(ScanMachine::new()),
        pin: PinState::new(),
        scan_action: use_scan_attendance(),
        camera: store_value(platform_camera()),
        stream: store_value(None),
        previous_flowers: store_value(None),
        auth,
    };

    let scan_action = vm.scan_action;
    create_effect(move |_| {
        let Some(result) = scan_action.value().get() else {
            return;
        };
        let outcome = outcome_for(vm.previous_flowers.get_value(), &result);
        if let Ok(response) = &result {
            set_auth.update(|state| {
                if let Some(user) = state.user.as_mut() {
                    if apply_scan_to_user(user, response) {
                        if let Err(err) = api.session().save_user(user) {
                            log::warn!("could not cache profile: {}", err);
                        }
                    }
                }
            });
        }
        vm.machine.update(|machine| {
            machine.finish(outcome);
        });
    });

    on_cleanup(move || vm.release_camera());

    vm
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::scanner::ScanStatus;
    use crate::test_support::ssr::with_runtime;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn invalid_pin_stays_in_modal() {
        with_runtime(|| {
            let vm = use_scanner_view_model();
            vm.open_pin();
            vm.pin.value.set("12".into());
            vm.submit_pin();
            assert_eq!(
                vm.pin.error.get().as_deref(),
                Some("El PIN debe tener 4 dígitos")
            );
            assert!(vm.pin.open.get());
            assert_eq!(vm.machine.with(|m| m.status()), ScanStatus::Idle);
        });
    }

    #[test]
    fn cancel_returns_to_idle_without_camera() {
        with_runtime(|| {
            let vm = use_scanner_view_model();
            vm.machine.update(|m| {
                m.begin().unwrap();
            });
            vm.cancel();
            vm.machine.with(|m| {
                assert_eq!(m.status(), ScanStatus::Idle);
                assert!(!m.holds_camera());
            });
        });
    }

    async fn scan_pin(server: &MockServer, pin: &str) -> Result<AttendanceScanResult, ApiError> {
        let api = ApiClient::new_with_base_url(server.url("/api"));
        api.session().save_token("tok-1").unwrap();
        api.scan_attendance(&ScanRequest::SessionPin(pin.into())).await
    }

    #[tokio::test]
    async fn matching_pin_awards_one_flower() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/attendance/scan")
                .json_body(json!({ "sessionPin": "1234" }));
            then.status(200).json_body(json!({
                "data": { "added": true, "message": "¡Asistencia registrada!", "flowers": 6 }
            }));
        });

        let mut machine = ScanMachine::new();
        machine.begin().unwrap();
        machine.begin_pin().unwrap();
        let result = scan_pin(&server, "1234").await;
        assert!(machine.finish(outcome_for(Some(5), &result)));
        assert_eq!(machine.status(), ScanStatus::Success);
        assert!(matches!(
            machine.outcome(),
            Some(ScanOutcome::Awarded { delta: 1, total: 6, .. })
        ));
    }

    #[tokio::test]
    async fn repeated_pin_is_duplicate_with_message() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/attendance/scan")
                .json_body(json!({ "sessionPin": "9999" }));
            then.status(200).json_body(json!({
                "data": { "added": false, "message": "Ya registraste esta sesión", "flowers": 5 }
            }));
        });

        let mut machine = ScanMachine::new();
        machine.begin_pin().unwrap();
        let result = scan_pin(&server, "9999").await;
        machine.finish(outcome_for(Some(5), &result));
        assert_eq!(machine.status(), ScanStatus::Duplicate);
        assert_eq!(
            machine.outcome().map(|o| o.message().to_string()).as_deref(),
            Some("Ya registraste esta sesión")
        );
    }

    #[tokio::test]
    async fn rejected_scan_is_error_with_server_message() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/attendance/scan");
            then.status(400).json_body(json!({ "message": "PIN inválido" }));
        });

        let mut machine = ScanMachine::new();
        machine.begin_pin().unwrap();
        let result = scan_pin(&server, "0000").await;
        machine.finish(outcome_for(None, &result));
        assert_eq!(machine.status(), ScanStatus::Error);
        assert_eq!(machine.outcome().map(|o| o.message()), Some("PIN inválido"));
    }
}
