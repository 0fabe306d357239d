use crate::api::{CreateGroupRequest, Group, UpdateGroupRequest};

pub const NAME_REQUIRED_MESSAGE: &str = "El nombre del grupo es obligatorio";
pub const MUTATION_FALLBACK_ERROR: &str = "Error al procesar la solicitud";

/// Which form, if any, is shown above the group list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GroupFormMode {
    #[default]
    Closed,
    Creating,
    Editing(String),
}

impl GroupFormMode {
    pub fn is_open(&self) -> bool {
        !matches!(self, GroupFormMode::Closed)
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            GroupFormMode::Editing(id) => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GroupFormMode::Editing(_) => "Editar Grupo",
            _ => "Crear Nuevo Grupo",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            GroupFormMode::Editing(_) => "Guardar Cambios",
            _ => "Crear Grupo",
        }
    }
}

pub fn integrant_count_label(count: u32) -> String {
    if count == 1 {
        "1 integrante".to_string()
    } else {
        format!("{} integrantes", count)
    }
}

pub fn active_label(is_active: bool) -> &'static str {
    if is_active {
        "Activo"
    } else {
        "Inactivo"
    }
}

fn checked_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NAME_REQUIRED_MESSAGE.to_string());
    }
    Ok(name.to_string())
}

pub fn create_request(name: &str, is_active: bool) -> Result<CreateGroupRequest, String> {
    Ok(CreateGroupRequest {
        name: checked_name(name)?,
        is_active,
    })
}

pub fn edit_request(name: &str, is_active: bool) -> Result<UpdateGroupRequest, String> {
    Ok(UpdateGroupRequest {
        name: Some(checked_name(name)?),
        is_active: Some(is_active),
    })
}

/// Flips only the active flag, leaving the name untouched.
pub fn toggle_request(group: &Group) -> UpdateGroupRequest {
    UpdateGroupRequest {
        name: None,
        is_active: Some(!group.is_active),
    }
}

pub fn message_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
