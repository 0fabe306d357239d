use crate::{
    api::{AttendanceScanResult, User},
    components::common::BadgeTone,
    scanner::ScanStatus,
};

pub fn status_icon(status: ScanStatus) -> &'static str {
    match status {
        ScanStatus::Success => "🌸",
        ScanStatus::Error => "❌",
        ScanStatus::Duplicate => "⚠️",
        _ => "📷",
    }
}

pub fn status_tone(status: ScanStatus) -> BadgeTone {
    match status {
        ScanStatus::Success => BadgeTone::Success,
        ScanStatus::Error => BadgeTone::Danger,
        ScanStatus::Duplicate => BadgeTone::Warning,
        _ => BadgeTone::Neutral,
    }
}

/// `+1 flor 🌸`, `+3 flores 🌸`; nothing for non-positive deltas.
pub fn flowers_label(delta: i64) -> Option<String> {
    match delta {
        d if d <= 0 => None,
        1 => Some("+1 flor 🌸".to_string()),
        d => Some(format!("+{} flores 🌸", d)),
    }
}

/// Mirrors an awarded scan onto the cached profile.
pub fn apply_scan_to_user(user: &mut User, result: &AttendanceScanResult) -> bool {
    if !result.added || user.flowers == result.flowers {
        return false;
    }
    user.flowers = result.flowers;
    true
}
