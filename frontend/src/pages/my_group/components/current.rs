use leptos::*;

use crate::{
    api::MyGroupSummary,
    components::common::{Badge, BadgeTone, Card},
};

#[component]
pub fn CurrentGroupCard(group: MyGroupSummary) -> impl IntoView {
    view! {
        <Card>
            <div class="flex items-center gap-4">
                <div class="text-4xl" aria-hidden="true">"🫱🏻‍🫲🏻"</div>
                <div class="flex flex-col items-start gap-2">
                    <Badge tone=BadgeTone::Success>{group.name}</Badge>
                    {(!group.is_active).then(|| view! { <Badge>"Grupo inactivo"</Badge> })}
                </div>
            </div>
            <p class="mt-4 text-sm text-fg-muted">
                "ℹ️ Si necesitas cambiar de grupo, por favor contacta a una servidora."
            </p>
        </Card>
    }
}
