use crate::{
    api::{ApiClient, ApiError, LoginRequest, User},
    state::query::{use_query_client, QueryClient, QueryScope},
};
use leptos::*;

pub type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

/// Queries whose results depend on who is signed in.
const IDENTITY_SCOPES: &[QueryScope] = &[
    QueryScope::CurrentUser,
    QueryScope::MyGroup,
    QueryScope::Leaderboard,
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            loading: false,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(User::is_admin).unwrap_or(false)
    }
}

fn use_api() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(ApiClient::new)
}

/// Resolves the stored session against `/me`.
///
/// Without a token no request is made. A rejected token clears local
/// credentials; any other failure falls back to the cached profile.
pub async fn restore_session(api: &ApiClient) -> AuthState {
    if api.session().token().is_none() {
        return AuthState::default();
    }
    match api.get_me().await {
        Ok(user) => {
            if let Err(err) = api.session().save_user(&user) {
                log::warn!("could not cache profile: {}", err);
            }
            AuthState::signed_in(user)
        }
        Err(err) if err.is_unauthorized() => {
            api.session().clear_identity();
            AuthState::default()
        }
        Err(err) => {
            log::warn!("profile refresh failed, using cached profile: {}", err);
            match api.session().cached_user() {
                Some(user) => AuthState::signed_in(user),
                None => {
                    api.session().clear_identity();
                    AuthState::default()
                }
            }
        }
    }
}

fn create_auth_context(api: ApiClient, query: QueryClient) -> AuthContext {
    let initial = match api.session().cached_user() {
        Some(user) if api.session().token().is_some() => AuthState {
            loading: true,
            ..AuthState::signed_in(user)
        },
        _ => AuthState {
            loading: api.session().token().is_some(),
            ..AuthState::default()
        },
    };
    let (auth_state, set_auth_state) = create_signal(initial);

    // Re-reads the profile on start and whenever `user` is invalidated.
    create_effect(move |_| {
        let _generation = query.generation(QueryScope::CurrentUser);
        if api.session().token().is_none() {
            set_auth_state.set(AuthState::default());
            return;
        }
        let api = api.clone();
        spawn_local(async move {
            let next = restore_session(&api).await;
            set_auth_state.set(next);
        });
    });

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context(use_api(), use_query_client());
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub async fn login_request(
    request: LoginRequest,
    api: &ApiClient,
    query: &QueryClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<User, ApiError> {
    set_auth_state.update(|state| state.loading = true);

    match api.login(request).await {
        Ok(response) => {
            set_auth_state.set(AuthState::signed_in(response.user.clone()));
            query.invalidate_all(IDENTITY_SCOPES);
            Ok(response.user)
        }
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

/// Local only: the backend keeps no server-side session to revoke.
pub fn logout(api: &ApiClient, query: &QueryClient, set_auth_state: WriteSignal<AuthState>) {
    api.session().clear_identity();
    query.clear();
    set_auth_state.set(AuthState::default());
    log::info!("signed out");
}

pub fn use_login_action() -> Action<LoginRequest, Result<User, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_api();
    let query = use_query_client();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        let query = query.clone();
        async move { login_request(payload, &api, &query, set_auth).await }
    })
}

pub fn use_logout() -> Callback<()> {
    let (_auth, set_auth) = use_auth();
    let api = use_api();
    let query = use_query_client();
    let redirect = crate::router::use_redirect();

    Callback::new(move |_| {
        logout(&api, &query, set_auth);
        redirect.call(crate::router::LOGIN_PATH.to_string());
    })
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn user_json(flowers: u32) -> serde_json::Value {
        json!({
            "id": "u1",
            "name": "Lucía",
            "identification": "1001",
            "role": "user",
            "flowers": flowers
        })
    }

    #[tokio::test]
    async fn login_and_logout_update_auth_state() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/auth/login")
                .json_body(json!({ "identification": "1001" }));
            then.status(200)
                .json_body(json!({ "data": { "token": "tok-9", "user": user_json(2) } }));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(AuthState::default());
        let query = QueryClient::new();
        let api = ApiClient::new_with_base_url(server.url("/api"));

        let user = login_request(
            LoginRequest {
                identification: "1001".into(),
            },
            &api,
            &query,
            set_state,
        )
        .await
        .unwrap();
        assert_eq!(user.flowers, 2);

        let snapshot = state.get();
        assert!(snapshot.is_authenticated);
        assert_eq!(api.session().token().as_deref(), Some("tok-9"));
        assert_eq!(query.generation_untracked(QueryScope::CurrentUser), 1);
        assert_eq!(query.generation_untracked(QueryScope::MyGroup), 1);
        assert_eq!(query.generation_untracked(QueryScope::Leaderboard), 1);

        logout(&api, &query, set_state);
        let snapshot = state.get();
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.user.is_none());
        assert!(api.session().token().is_none());
        assert!(api.session().cached_user().is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_login_keeps_signed_out_state() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(404)
                .json_body(json!({ "message": "Usuario no encontrado" }));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(AuthState::default());
        let api = ApiClient::new_with_base_url(server.url("/api"));
        let err = login_request(
            LoginRequest {
                identification: "0000".into(),
            },
            &api,
            &QueryClient::new(),
            set_state,
        )
        .await
        .unwrap_err();
        assert_eq!(err.message, "Usuario no encontrado");
        let snapshot = state.get();
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.loading);
        runtime.dispose();
    }

    #[tokio::test]
    async fn restore_without_token_skips_network() {
        let server = MockServer::start_async().await;
        let me = server.mock(|when, then| {
            when.method(GET).path("/api/me");
            then.status(200).json_body(json!({ "data": user_json(1) }));
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));
        let state = restore_session(&api).await;
        assert_eq!(state, AuthState::default());
        me.assert_hits(0);
    }

    #[tokio::test]
    async fn restore_refreshes_cached_profile() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path("/api/me")
                .header("authorization", "Bearer tok-1");
            then.status(200).json_body(json!({ "data": user_json(7) }));
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));
        api.session().save_token("tok-1").unwrap();

        let state = restore_session(&api).await;
        assert!(state.is_authenticated);
        assert_eq!(state.user.map(|u| u.flowers), Some(7));
        assert_eq!(api.session().cached_user().map(|u| u.flowers), Some(7));
    }

    #[tokio::test]
    async fn restore_with_rejected_token_signs_out() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/me");
            then.status(401).json_body(json!({ "message": "Token inválido" }));
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));
        api.session().save_token("stale").unwrap();

        let state = restore_session(&api).await;
        assert!(!state.is_authenticated);
        assert!(api.session().token().is_none());
    }

    #[tokio::test]
    async fn restore_falls_back_to_cached_profile_on_server_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/me");
            then.status(500).body("boom");
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));
        api.session().save_token("tok-1").unwrap();
        let cached: User = serde_json::from_value(user_json(4)).unwrap();
        api.session().save_user(&cached).unwrap();

        let state = restore_session(&api).await;
        assert!(state.is_authenticated);
        assert_eq!(state.user.map(|u| u.flowers), Some(4));
        assert_eq!(api.session().token().as_deref(), Some("tok-1"));
    }
}
