use super::utils::{login_error_message, LoginFormState};
use crate::api::{LoginRequest, User};
use crate::router::{use_redirect, SCANNER_PATH};
use crate::state::auth;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<String>>,
    pub login_action: Action<LoginRequest, Result<User, crate::api::ApiError>>,
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        match self.form.to_request() {
            Ok(request) => {
                self.error.set(None);
                self.login_action.dispatch(request);
            }
            Err(msg) => self.error.set(Some(msg)),
        }
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<String>);
    let login_action = auth::use_login_action();
    let redirect = use_redirect();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(user) => {
                    log::info!("signed in as {}", user.id);
                    error.set(None);
                    redirect.call(SCANNER_PATH.to_string());
                }
                Err(err) => error.set(Some(login_error_message(&err.message))),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            let vm = use_login_view_model();
            assert!(vm.error.get().is_none());
            assert!(vm.form.identification.get().is_empty());
        });
    }

    #[test]
    fn submit_with_blank_identification_sets_error() {
        with_runtime(|| {
            let vm = use_login_view_model();
            vm.submit();
            assert_eq!(
                vm.error.get().as_deref(),
                Some("Por favor ingresa tu número de identificación")
            );
        });
    }
}
