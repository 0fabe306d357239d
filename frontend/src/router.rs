use leptos::*;
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::{
        guard::{RequireAdmin, RequireAuth},
        install_prompt::InstallPrompt,
    },
    pages::{
        admin_groups::AdminGroupsPage, admin_sessions::AdminSessionsPage,
        admin_users::AdminUsersPage, jardin::JardinPage, login::LoginPage,
        my_group::MyGroupPage, scanner::ScannerPage,
    },
    state::{auth::AuthProvider, query::QueryClient},
};

pub const LOGIN_PATH: &str = "/login";
pub const SCANNER_PATH: &str = "/scanner";
pub const JARDIN_PATH: &str = "/jardin";
pub const MY_GROUP_PATH: &str = "/my-group";
pub const ADMIN_SESSIONS_PATH: &str = "/admin/sessions";
pub const ADMIN_USERS_PATH: &str = "/admin/users";
pub const ADMIN_GROUPS_PATH: &str = "/admin/groups";

pub const ROUTE_PATHS: &[&str] = &[
    LOGIN_PATH,
    SCANNER_PATH,
    JARDIN_PATH,
    MY_GROUP_PATH,
    ADMIN_SESSIONS_PATH,
    ADMIN_USERS_PATH,
    ADMIN_GROUPS_PATH,
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    SCANNER_PATH,
    JARDIN_PATH,
    MY_GROUP_PATH,
    ADMIN_SESSIONS_PATH,
    ADMIN_USERS_PATH,
    ADMIN_GROUPS_PATH,
];

pub const ADMIN_ROUTE_PATHS: &[&str] = &[ADMIN_SESSIONS_PATH, ADMIN_USERS_PATH, ADMIN_GROUPS_PATH];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &[LOGIN_PATH];

/// Client-side navigation inside a `<Router>`, a full page load outside one.
pub fn use_redirect() -> Callback<String> {
    if use_context::<RouterContext>().is_some() {
        let navigate = use_navigate();
        Callback::new(move |path: String| navigate(&path, NavigateOptions::default()))
    } else {
        Callback::new(move |path: String| hard_redirect(&path))
    }
}

#[cfg(target_arch = "wasm32")]
fn hard_redirect(path: &str) {
    let result = web_sys::window()
        .ok_or_else(|| "no window".to_string())
        .and_then(|w| w.location().set_href(path).map_err(|e| format!("{:?}", e)));
    if let Err(err) = result {
        log::warn!("redirect to {} failed: {}", path, err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn hard_redirect(path: &str) {
    log::debug!("redirect to {} outside a router", path);
}

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiClient::new());
    provide_context(QueryClient::new());
    view! {
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=ToLogin/>
                    <Route path=LOGIN_PATH view=LoginPage/>
                    <Route path=SCANNER_PATH view=ProtectedScanner/>
                    <Route path=JARDIN_PATH view=ProtectedJardin/>
                    <Route path=MY_GROUP_PATH view=ProtectedMyGroup/>
                    <Route path=ADMIN_SESSIONS_PATH view=AdminSessions/>
                    <Route path=ADMIN_USERS_PATH view=AdminUsers/>
                    <Route path=ADMIN_GROUPS_PATH view=AdminGroups/>
                    <Route path="/*any" view=ToLogin/>
                </Routes>
                <InstallPrompt/>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ToLogin() -> impl IntoView {
    view! { <Redirect path=LOGIN_PATH/> }
}

#[component]
fn ProtectedScanner() -> impl IntoView {
    view! { <RequireAuth><ScannerPage/></RequireAuth> }
}

#[component]
fn ProtectedJardin() -> impl IntoView {
    view! { <RequireAuth><JardinPage/></RequireAuth> }
}

#[component]
fn ProtectedMyGroup() -> impl IntoView {
    view! { <RequireAuth><MyGroupPage/></RequireAuth> }
}

#[component]
fn AdminSessions() -> impl IntoView {
    view! { <RequireAdmin><AdminSessionsPage/></RequireAdmin> }
}

#[component]
fn AdminUsers() -> impl IntoView {
    view! { <RequireAdmin><AdminUsersPage/></RequireAdmin> }
}

#[component]
fn AdminGroups() -> impl IntoView {
    view! { <RequireAdmin><AdminGroupsPage/></RequireAdmin> }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn redirect_outside_router_does_not_panic() {
        with_runtime(|| {
            let redirect = use_redirect();
            redirect.call(LOGIN_PATH.to_string());
        });
    }
}
