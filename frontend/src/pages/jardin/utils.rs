use crate::api::{Leaderboard, LeaderboardEntry};

pub fn medal(rank: u32) -> Option<&'static str> {
    match rank {
        1 => Some("🥇"),
        2 => Some("🥈"),
        3 => Some("🥉"),
        _ => None,
    }
}

pub fn rank_label(rank: u32) -> String {
    medal(rank)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", rank))
}

/// The server's `currentUser` entry, else the list row matching `user_id`.
pub fn current_entry(board: &Leaderboard, user_id: Option<&str>) -> Option<LeaderboardEntry> {
    board.current_user.clone().or_else(|| {
        let user_id = user_id?;
        board
            .entries
            .iter()
            .find(|entry| entry.user.id == user_id)
            .cloned()
    })
}

pub fn is_me(entry: &LeaderboardEntry, user_id: Option<&str>) -> bool {
    entry.is_current_user || user_id.is_some_and(|id| entry.user.id == id)
}
