use leptos::*;

use crate::{
    api::{Leaderboard, LeaderboardEntry},
    components::common::{Badge, BadgeTone, Card},
    pages::jardin::utils::{current_entry, is_me, medal},
};

#[component]
pub fn CurrentUserCard(entry: LeaderboardEntry) -> impl IntoView {
    view! {
        <Card class="border-action-primary-bg">
            <div class="flex items-center justify-between gap-4">
                <div>
                    <p class="text-xs uppercase tracking-wide text-fg-muted">"Tu posición"</p>
                    <h2 class="text-xl font-semibold text-fg">{entry.user.name.clone()}</h2>
                </div>
                <div class="flex items-center gap-3">
                    <Badge tone=BadgeTone::Success>{format!("#{}", entry.rank)}</Badge>
                    <span class="text-2xl font-bold text-fg">{entry.flowers}</span>
                    <span class="text-2xl" aria-hidden="true">"🌸"</span>
                </div>
            </div>
        </Card>
    }
}

#[component]
pub fn LeaderboardRow(entry: LeaderboardEntry, is_me: bool) -> impl IntoView {
    let row_class = if is_me {
        "flex items-center gap-4 rounded-xl border-2 border-action-primary-bg bg-surface-elevated px-4 py-3"
    } else {
        "flex items-center gap-4 rounded-xl border border-border bg-surface-elevated px-4 py-3"
    };
    let rank = match medal(entry.rank) {
        Some(medal) => view! { <span class="text-2xl">{medal}</span> }.into_view(),
        None => view! { <span class="text-sm font-semibold text-fg-muted">{format!("#{}", entry.rank)}</span> }
            .into_view(),
    };

    view! {
        <li class=row_class>
            <div class="w-10 text-center">{rank}</div>
            <div class="flex-1 min-w-0">
                <h4 class="truncate font-medium text-fg">{entry.user.name}</h4>
                {is_me.then(|| view! { <span class="text-xs font-semibold text-action-primary-bg">"Tú"</span> })}
            </div>
            <div class="flex items-center gap-1">
                <span class="font-semibold text-fg">{entry.flowers}</span>
                <span aria-hidden="true">"🌸"</span>
            </div>
        </li>
    }
}

#[component]
pub fn LeaderboardView(board: Leaderboard, #[prop(optional)] user_id: Option<String>) -> impl IntoView {
    let mine = current_entry(&board, user_id.as_deref());
    let rows = board
        .entries
        .into_iter()
        .map(|entry| {
            let me = is_me(&entry, user_id.as_deref());
            view! { <LeaderboardRow entry=entry is_me=me /> }
        })
        .collect_view();

    view! {
        <div class="space-y-6">
            {mine.map(|entry| view! { <CurrentUserCard entry=entry /> })}
            <div>
                <h3 class="text-lg font-semibold text-fg">"Orden de Flores"</h3>
                <p class="text-sm text-fg-muted">"Celebramos a cada hermana por su compromiso"</p>
            </div>
            <ul class="space-y-2">{rows}</ul>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::LeaderboardUser;
    use crate::test_support::ssr::render_to_string;

    fn entry(rank: u32, id: &str, name: &str, flowers: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            rank,
            user: LeaderboardUser {
                id: id.into(),
                name: name.into(),
                avatar: None,
            },
            flowers,
            is_current_user: false,
        }
    }

    #[test]
    fn renders_medals_and_me_marker() {
        let board = Leaderboard {
            entries: vec![
                entry(1, "a", "Ana", 10),
                entry(2, "b", "Beatriz", 8),
                entry(3, "c", "Carmen", 6),
                entry(4, "u-regular", "Lucía Participante", 3),
            ],
            current_user: None,
        };
        let html = render_to_string(move || {
            view! { <LeaderboardView board=board user_id="u-regular".to_string() /> }
        });
        assert!(html.contains("🥇"));
        assert!(html.contains("🥉"));
        assert!(html.contains("#4"));
        assert!(html.contains("Tu posición"));
        assert!(html.contains("Tú"));
    }

    #[test]
    fn anonymous_board_has_no_position_card() {
        let board = Leaderboard {
            entries: vec![entry(1, "a", "Ana", 10)],
            current_user: None,
        };
        let html = render_to_string(move || view! { <LeaderboardView board=board /> });
        assert!(html.contains("Ana"));
        assert!(!html.contains("Tu posición"));
    }
}
