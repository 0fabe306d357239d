use leptos::*;

use crate::{
    api::ImportSummary,
    components::common::{Badge, BadgeTone, Card},
};

/// Outcome of a bulk or CSV import; both paths return the same summary.
#[component]
pub fn ImportResult(summary: ImportSummary) -> impl IntoView {
    let ImportSummary {
        created,
        updated,
        errors,
        ..
    } = summary;
    let created_count = created.len();
    let updated_count = updated.len();
    let error_count = errors.len();

    view! {
        <Card class="space-y-4">
            <h4 class="font-semibold text-fg">"Resultado de Importación"</h4>
            <div class="flex flex-wrap gap-4">
                <div class="flex items-center gap-2">
                    <Badge tone=BadgeTone::Success>{created_count}</Badge>
                    <span class="text-sm text-fg-muted">"Creados"</span>
                </div>
                {(updated_count > 0).then(|| view! {
                    <div class="flex items-center gap-2">
                        <Badge>{updated_count}</Badge>
                        <span class="text-sm text-fg-muted">"Actualizados"</span>
                    </div>
                })}
                {(error_count > 0).then(|| view! {
                    <div class="flex items-center gap-2">
                        <Badge tone=BadgeTone::Danger>{error_count}</Badge>
                        <span class="text-sm text-fg-muted">"Errores"</span>
                    </div>
                })}
            </div>
            {(!created.is_empty()).then(|| view! {
                <div>
                    <h5 class="text-sm font-medium text-fg">"✅ Usuarios creados:"</h5>
                    <ul class="mt-1 space-y-1 text-sm text-fg-muted">
                        {created
                            .into_iter()
                            .map(|user| view! { <li>{format!("{} ({})", user.name, user.identification)}</li> })
                            .collect_view()}
                    </ul>
                </div>
            })}
            {(!errors.is_empty()).then(|| view! {
                <div>
                    <h5 class="text-sm font-medium text-status-error-text">"❌ Errores:"</h5>
                    <ul class="mt-1 space-y-1 text-sm text-status-error-text">
                        {errors
                            .into_iter()
                            .map(|failure| view! {
                                <li>{format!("{} ({}): {}", failure.name, failure.identification, failure.error)}</li>
                            })
                            .collect_view()}
                    </ul>
                </div>
            })}
        </Card>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{ImportFailure, ImportedUser};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn lists_created_users_and_errors() {
        let summary = ImportSummary {
            created: vec![ImportedUser {
                identification: "1001".into(),
                name: "Ana".into(),
            }],
            updated: Vec::new(),
            errors: vec![ImportFailure {
                identification: "1002".into(),
                name: "Berta".into(),
                error: "Identificación duplicada".into(),
            }],
            total: 2,
        };
        let html = render_to_string(move || view! { <ImportResult summary=summary /> });
        assert!(html.contains("Ana (1001)"));
        assert!(html.contains("Berta (1002): Identificación duplicada"));
        assert!(html.contains("Errores"));
        assert!(!html.contains("Actualizados"));
    }
}
