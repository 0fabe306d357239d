use leptos::*;

#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(optional, into)] description: Option<String>,
    #[prop(optional, into)] icon: Option<String>,
) -> impl IntoView {
    view! {
        <div class="text-center py-12 px-4 rounded-2xl border-2 border-dashed border-border-strong bg-surface-muted">
            <div class="text-4xl" aria-hidden="true">{icon.unwrap_or_else(|| "🌱".to_string())}</div>
            <h3 class="mt-2 text-sm font-semibold text-fg">{title}</h3>
            {description.map(|desc| view! {
                <p class="mt-1 text-sm text-fg-muted">{desc}</p>
            })}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_title_description_and_default_icon() {
        let html = render_to_string(move || {
            view! {
                <EmptyState
                    title="No hay grupos creados"
                    description="Crea el primer grupo para empezar."
                />
            }
        });
        assert!(html.contains("No hay grupos creados"));
        assert!(html.contains("Crea el primer grupo"));
        assert!(html.contains("🌱"));
    }
}
