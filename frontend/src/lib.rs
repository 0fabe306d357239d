use leptos::*;

pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod scanner;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

use utils::{
    storage::SessionStore,
    version::{enforce_app_version, VersionCheck},
};

/// Returns true when stale storage was dropped and the page is about to reload.
fn check_app_version() -> bool {
    let store = SessionStore::browser();
    match enforce_app_version(store.raw(), config::APP_VERSION) {
        VersionCheck::Upgraded { removed } => {
            log::info!(
                "upgraded to {}, dropped {} stored keys",
                config::APP_VERSION,
                removed.len()
            );
            purge_offline_state_and_reload()
        }
        VersionCheck::Current => false,
    }
}

/// Unregisters service workers and empties CacheStorage before reloading, so
/// the next load is served by the network instead of a stale bundle.
#[cfg(target_arch = "wasm32")]
fn purge_offline_state_and_reload() -> bool {
    if web_sys::window().is_none() {
        return false;
    }
    spawn_local(async move {
        pwa::unregister_service_workers().await;
        pwa::clear_cache_storage().await;
        if let Some(Err(err)) = web_sys::window().map(|w| w.location().reload()) {
            log::warn!("reload failed: {:?}", err);
        }
    });
    true
}

#[cfg(not(target_arch = "wasm32"))]
fn purge_offline_state_and_reload() -> bool {
    false
}

#[cfg(target_arch = "wasm32")]
mod pwa {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    pub async fn unregister_service_workers() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let container = window.navigator().service_worker();
        let registrations = match JsFuture::from(container.get_registrations()).await {
            Ok(list) => js_sys::Array::from(&list),
            Err(err) => {
                log::warn!("could not list service workers: {:?}", err);
                return;
            }
        };
        for entry in registrations.iter() {
            let Ok(registration) = entry.dyn_into::<web_sys::ServiceWorkerRegistration>() else {
                continue;
            };
            match registration.unregister() {
                Ok(promise) => {
                    if let Err(err) = JsFuture::from(promise).await {
                        log::warn!("service worker unregister failed: {:?}", err);
                    }
                }
                Err(err) => log::warn!("service worker unregister failed: {:?}", err),
            }
        }
    }

    pub async fn clear_cache_storage() {
        let Some(caches) = web_sys::window().and_then(|w| w.caches().ok()) else {
            return;
        };
        let names = match JsFuture::from(caches.keys()).await {
            Ok(list) => js_sys::Array::from(&list),
            Err(err) => {
                log::warn!("could not list caches: {:?}", err);
                return;
            }
        };
        for name in names.iter().filter_map(|name| name.as_string()) {
            if let Err(err) = JsFuture::from(caches.delete(&name)).await {
                log::warn!("could not delete cache {}: {:?}", name, err);
            }
        }
    }
}

pub fn run() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("starting Flores {}", config::APP_VERSION);

    if check_app_version() {
        return;
    }

    // Runtime config (env.js globals, then ./config.json) loads in the background;
    // API calls await it before resolving their base URL.
    spawn_local(async move {
        config::init().await;
    });

    router::mount_app();
}
