use crate::{
    components::layout::LoadingSpinner,
    router::{use_redirect, LOGIN_PATH, SCANNER_PATH},
    state::auth::use_auth,
};
use leptos::*;

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    let redirect = use_redirect();
    create_effect(move |_| {
        if let Some(target) = auth_redirect_target(is_authenticated.get(), is_loading.get()) {
            redirect.call(target.to_string());
        }
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_loading.get())
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_loading: bool) -> bool {
    is_authenticated && !is_loading
}

fn auth_redirect_target(is_authenticated: bool, is_loading: bool) -> Option<&'static str> {
    (!is_loading && !is_authenticated).then_some(LOGIN_PATH)
}

#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    let is_admin = create_memo(move |_| auth.get().is_admin());
    let redirect = use_redirect();
    create_effect(move |_| {
        if let Some(target) =
            admin_redirect_target(is_authenticated.get(), is_loading.get(), is_admin.get())
        {
            redirect.call(target.to_string());
        }
    });
    view! {
        <Show
            when=move || {
                should_render_admin_children(is_authenticated.get(), is_loading.get(), is_admin.get())
            }
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_admin_children(is_authenticated: bool, is_loading: bool, is_admin: bool) -> bool {
    is_authenticated && is_admin && !is_loading
}

fn admin_redirect_target(
    is_authenticated: bool,
    is_loading: bool,
    is_admin: bool,
) -> Option<&'static str> {
    if is_loading {
        None
    } else if !is_authenticated {
        Some(LOGIN_PATH)
    } else if !is_admin {
        Some(SCANNER_PATH)
    } else {
        None
    }
}

/// Sends signed-in visitors of public pages to the scanner.
#[component]
pub fn RedirectIfAuthenticated(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let redirect = use_redirect();
    create_effect(move |_| {
        if is_authenticated.get() {
            redirect.call(SCANNER_PATH.to_string());
        }
    });
    view! {
        <Show when=move || !is_authenticated.get()>
            {children()}
        </Show>
    }
}
