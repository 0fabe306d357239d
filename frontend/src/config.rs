use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::Bogota;

/// Build version compared against the stored `app_version` on start.
pub const APP_VERSION: &str = match option_env!("FLORES_APP_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub time_zone: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static TIME_ZONE: OnceLock<Tz> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
mod globals {
    use super::RuntimeConfig;
    use anyhow::{anyhow, bail, Context};
    use wasm_bindgen::JsValue;

    fn read_object(name: &str) -> Option<js_sys::Object> {
        let w = web_sys::window()?;
        let any = js_sys::Reflect::get(&w, &name.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        Some(js_sys::Object::from(any))
    }

    fn read_string(obj: &js_sys::Object, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(obj, &(*key).into())
                .ok()
                .filter(|v| !v.is_undefined() && !v.is_null())
                .and_then(|v| v.as_string())
        })
    }

    /// `window.__FLORES_ENV` (env.js) wins over `window.__FLORES_CONFIG`.
    pub fn snapshot() -> RuntimeConfig {
        let mut cfg = RuntimeConfig::default();
        for name in ["__FLORES_ENV", "__FLORES_CONFIG"] {
            let Some(obj) = read_object(name) else {
                continue;
            };
            if cfg.api_base_url.is_none() {
                cfg.api_base_url = read_string(&obj, &["API_BASE_URL", "api_base_url"]);
            }
            if cfg.time_zone.is_none() {
                cfg.time_zone = read_string(&obj, &["TIME_ZONE", "time_zone"]);
            }
        }
        cfg
    }

    pub fn write(cfg: &RuntimeConfig) {
        let Some(w) = web_sys::window() else {
            return;
        };
        let obj = js_sys::Object::new();
        if let Some(url) = &cfg.api_base_url {
            let _ = js_sys::Reflect::set(&obj, &"api_base_url".into(), &JsValue::from_str(url));
        }
        if let Some(tz) = &cfg.time_zone {
            let _ = js_sys::Reflect::set(&obj, &"time_zone".into(), &JsValue::from_str(tz));
        }
        let _ = js_sys::Reflect::set(&w, &"__FLORES_CONFIG".into(), &obj);
    }

    pub async fn fetch() -> anyhow::Result<RuntimeConfig> {
        let origin = web_sys::window()
            .context("no window")?
            .location()
            .origin()
            .map_err(|_| anyhow!("location origin unavailable"))?;
        let url = format!("{}/config.json", origin);
        let resp = reqwest::get(&url)
            .await
            .with_context(|| format!("fetching {}", url))?;
        if !resp.status().is_success() {
            bail!("{} answered {}", url, resp.status());
        }
        resp.json::<RuntimeConfig>()
            .await
            .context("config.json is not valid")
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod globals {
    use super::RuntimeConfig;

    pub fn snapshot() -> RuntimeConfig {
        RuntimeConfig::default()
    }

    pub fn write(_cfg: &RuntimeConfig) {}

    pub async fn fetch() -> anyhow::Result<RuntimeConfig> {
        anyhow::bail!("config.json is only served to the browser build")
    }
}

fn merge(primary: RuntimeConfig, fallback: Option<RuntimeConfig>) -> RuntimeConfig {
    let fallback = fallback.unwrap_or_default();
    RuntimeConfig {
        api_base_url: primary
            .api_base_url
            .filter(|url| !url.trim().is_empty())
            .or(fallback.api_base_url),
        time_zone: primary.time_zone.or(fallback.time_zone),
    }
}

pub fn parse_time_zone(raw: Option<&str>) -> Tz {
    raw.and_then(|name| match name.trim().parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(err) => {
            log::warn!("ignoring unknown time zone {:?}: {}", name, err);
            None
        }
    })
    .unwrap_or(DEFAULT_TIME_ZONE)
}

fn cache(cfg: &RuntimeConfig) -> String {
    let url = cfg
        .api_base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let _ = API_BASE_URL.set(url.clone());
    let _ = TIME_ZONE.set(parse_time_zone(cfg.time_zone.as_deref()));
    url
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    let snapshot = globals::snapshot();
    if snapshot.api_base_url.is_some() {
        return cache(&snapshot);
    }
    let fetched = match globals::fetch().await {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            log::debug!("runtime config file unavailable: {:#}", err);
            None
        }
    };
    let merged = merge(snapshot, fetched);
    globals::write(&merged);
    cache(&merged)
}

pub fn current_time_zone() -> Tz {
    TIME_ZONE.get().copied().unwrap_or(DEFAULT_TIME_ZONE)
}

pub async fn init() {
    let url = await_api_base_url().await;
    log::info!("api base url resolved to {}", url);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_globals_over_config_file() {
        let merged = merge(
            RuntimeConfig {
                api_base_url: Some("https://api.example.org".into()),
                time_zone: None,
            },
            Some(RuntimeConfig {
                api_base_url: Some("https://ignored".into()),
                time_zone: Some("Europe/Madrid".into()),
            }),
        );
        assert_eq!(merged.api_base_url.as_deref(), Some("https://api.example.org"));
        assert_eq!(merged.time_zone.as_deref(), Some("Europe/Madrid"));
    }

    #[test]
    fn merge_skips_blank_urls() {
        let merged = merge(
            RuntimeConfig {
                api_base_url: Some("  ".into()),
                time_zone: None,
            },
            None,
        );
        assert!(merged.api_base_url.is_none());
    }

    #[test]
    fn parse_time_zone_falls_back() {
        assert_eq!(parse_time_zone(None), DEFAULT_TIME_ZONE);
        assert_eq!(parse_time_zone(Some("Mars/Olympus")), DEFAULT_TIME_ZONE);
        assert_eq!(
            parse_time_zone(Some("Europe/Madrid")),
            chrono_tz::Europe::Madrid
        );
    }

    #[test]
    fn app_version_is_not_empty() {
        assert!(!APP_VERSION.is_empty());
    }
}
