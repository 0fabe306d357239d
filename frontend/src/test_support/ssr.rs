use leptos::*;

use crate::{api::ApiClient, api::User, state::query::QueryClient, test_support::helpers};

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(|| view().into_view().render_to_string().to_string());
    leptos_reactive::suppress_resource_load(false);
    html
}

/// Renders with the contexts the app root provides, signed in as `user`.
pub fn render_as<F, N>(user: Option<User>, view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    render_to_string(move || {
        provide_context(ApiClient::new_with_base_url("http://localhost:0/api"));
        provide_context(QueryClient::new());
        helpers::provide_auth(user);
        view()
    })
}
