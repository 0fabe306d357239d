use crate::{
    router::{
        ADMIN_GROUPS_PATH, ADMIN_SESSIONS_PATH, ADMIN_USERS_PATH, JARDIN_PATH, MY_GROUP_PATH,
        SCANNER_PATH,
    },
    state::auth::{use_auth, use_logout},
};
use leptos::*;

pub const MEMBER_LINKS: &[(&str, &str)] = &[
    (SCANNER_PATH, "Registrar"),
    (JARDIN_PATH, "Jardín"),
    (MY_GROUP_PATH, "Mi grupo"),
];

pub const ADMIN_LINKS: &[(&str, &str)] = &[
    (ADMIN_SESSIONS_PATH, "Sesiones"),
    (ADMIN_USERS_PATH, "Usuarios"),
    (ADMIN_GROUPS_PATH, "Grupos"),
];

const LINK_CLASS: &str =
    "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

pub fn visible_links(is_admin: bool) -> Vec<(&'static str, &'static str)> {
    let mut links = MEMBER_LINKS.to_vec();
    if is_admin {
        links.extend_from_slice(ADMIN_LINKS);
    }
    links
}

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let (menu_open, set_menu_open) = create_signal(false);
    let is_admin = create_memo(move |_| auth.get().is_admin());
    let user_name = move || auth.get().user.map(|user| user.name).unwrap_or_default();
    let logout = use_logout();
    let on_logout = move |_| {
        set_menu_open.set(false);
        logout.call(());
    };
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-5xl mx-auto px-4 sm:px-6">
                <div class="flex justify-between items-center h-16">
                    <a href=SCANNER_PATH class="flex items-center gap-2">
                        <span aria-hidden="true">"🌸"</span>
                        <h1 class="text-xl font-semibold text-fg">"Flores"</h1>
                    </a>
                    <div class="flex items-center">
                        <nav class="hidden lg:flex items-center space-x-2">
                            {move || {
                                visible_links(is_admin.get())
                                    .into_iter()
                                    .map(|(href, label)| view! { <a href=href class=LINK_CLASS>{label}</a> })
                                    .collect_view()
                            }}
                            <span class="text-sm text-fg-muted px-2">{user_name}</span>
                            <button on:click=on_logout class=LINK_CLASS>
                                "Cerrar Sesión"
                            </button>
                        </nav>
                        <button
                            type="button"
                            class="lg:hidden inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                            on:click=toggle_menu
                            aria-expanded=move || menu_open.get()
                            aria-controls="mobile-nav"
                        >
                            <span class="sr-only">
                                {move || if menu_open.get() { "Cerrar menú" } else { "Abrir menú" }}
                            </span>
                            <span aria-hidden="true" class="text-xl">
                                {move || if menu_open.get() { "✕" } else { "☰" }}
                            </span>
                        </button>
                    </div>
                </div>
                <Show when=move || menu_open.get()>
                    <div id="mobile-nav" class="lg:hidden border-t border-border">
                        <nav class="px-4 py-3 space-y-2">
                            {move || {
                                visible_links(is_admin.get())
                                    .into_iter()
                                    .map(|(href, label)| {
                                        view! {
                                            <a
                                                href=href
                                                class=format!("block {}", LINK_CLASS)
                                                on:click=move |_| set_menu_open.set(false)
                                            >
                                                {label}
                                            </a>
                                        }
                                    })
                                    .collect_view()
                            }}
                            <button
                                on:click=on_logout
                                class=format!("w-full text-left {}", LINK_CLASS)
                            >
                                "Cerrar Sesión"
                            </button>
                        </nav>
                    </div>
                </Show>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-5xl mx-auto py-6 px-4 sm:px-6">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex flex-col justify-center items-center gap-3 p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
            {label.map(|label| view! { <p class="text-sm text-fg-muted">{label}</p> })}
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded-xl mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded-xl mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

pub const FLASH_MILLIS: u32 = 4000;

/// Clears a flash message after `millis`, unless it changed meanwhile.
pub fn clear_flash_after(flash: RwSignal<Option<String>>, millis: u32) {
    #[cfg(target_arch = "wasm32")]
    {
        let shown = flash.get_untracked();
        gloo_timers::callback::Timeout::new(millis, move || {
            if flash.try_get_untracked().flatten() == shown {
                flash.try_set(None);
            }
        })
        .forget();
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (flash, millis);
}
