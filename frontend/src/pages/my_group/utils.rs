use crate::api::Group;

pub const JOIN_FALLBACK_ERROR: &str = "Error al unirse al grupo. Por favor intenta de nuevo.";

pub fn member_count_label(count: u32) -> String {
    if count == 1 {
        "1 miembro".to_string()
    } else {
        format!("{} miembros", count)
    }
}

/// Inactive groups stay visible but cannot be chosen.
pub fn is_selectable(is_active: bool, pending: bool) -> bool {
    is_active && !pending
}

pub fn group_name(groups: &[Group], id: &str) -> Option<String> {
    groups
        .iter()
        .find(|group| group.id == id)
        .map(|group| group.name.clone())
}

pub fn join_error_message(message: &str) -> String {
    if message.trim().is_empty() {
        JOIN_FALLBACK_ERROR.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: &str, active: bool) -> Group {
        Group {
            id: id.into(),
            name: format!("Grupo {}", id),
            member_count: 0,
            is_active: active,
            users: Vec::new(),
        }
    }

    #[test]
    fn member_count_pluralizes() {
        assert_eq!(member_count_label(1), "1 miembro");
        assert_eq!(member_count_label(0), "0 miembros");
        assert_eq!(member_count_label(7), "7 miembros");
    }

    #[test]
    fn inactive_or_pending_blocks_selection() {
        assert!(is_selectable(true, false));
        assert!(!is_selectable(true, true));
        assert!(!is_selectable(false, false));
    }

    #[test]
    fn looks_up_selected_name() {
        let groups = vec![group("a", true), group("b", false)];
        assert_eq!(group_name(&groups, "b").as_deref(), Some("Grupo b"));
        assert_eq!(group_name(&groups, "z"), None);
    }

    #[test]
    fn blank_join_error_uses_fallback() {
        assert_eq!(join_error_message(" "), JOIN_FALLBACK_ERROR);
        assert_eq!(join_error_message("Ya perteneces a un grupo"), "Ya perteneces a un grupo");
    }
}
