use uuid::Uuid;

use crate::api::{AssignGroupRequest, BulkUserInput, BulkUsersRequest, Role};

pub const INVALID_CSV_MESSAGE: &str = "Por favor selecciona un archivo CSV válido";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UsersTab {
    #[default]
    Form,
    Csv,
    Users,
}

impl UsersTab {
    pub const ALL: [UsersTab; 3] = [UsersTab::Form, UsersTab::Csv, UsersTab::Users];

    pub fn label(self) -> &'static str {
        match self {
            UsersTab::Form => "📝 Formulario",
            UsersTab::Csv => "📄 Importar CSV",
            UsersTab::Users => "👥 Usuarias",
        }
    }
}

/// One editable row of the bulk form, keyed so rows survive reordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRow {
    pub key: Uuid,
    pub name: String,
    pub identification: String,
    pub role: Role,
}

impl Default for BulkRow {
    fn default() -> Self {
        Self {
            key: Uuid::new_v4(),
            name: String::new(),
            identification: String::new(),
            role: Role::User,
        }
    }
}

impl BulkRow {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.identification.trim().is_empty()
    }

    pub fn to_input(&self) -> BulkUserInput {
        BulkUserInput {
            name: self.name.trim().to_string(),
            identification: self.identification.trim().to_string(),
            role: self.role,
        }
    }
}

pub fn complete_count(rows: &[BulkRow]) -> usize {
    rows.iter().filter(|row| row.is_complete()).count()
}

/// Incomplete rows are dropped; `None` when nothing is left to send.
pub fn bulk_request(rows: &[BulkRow]) -> Option<BulkUsersRequest> {
    let users: Vec<BulkUserInput> = rows
        .iter()
        .filter(|row| row.is_complete())
        .map(BulkRow::to_input)
        .collect();
    (!users.is_empty()).then_some(BulkUsersRequest { users })
}

pub fn remove_row(rows: &mut Vec<BulkRow>, key: Uuid) {
    if rows.len() > 1 {
        rows.retain(|row| row.key != key);
    }
}

pub fn is_csv_file_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".csv")
}

pub fn format_file_size(bytes: f64) -> String {
    format!("{:.2} KB", bytes / 1024.0)
}

pub fn created_message(count: usize) -> String {
    match count {
        1 => "Se creó 1 usuario correctamente.".to_string(),
        n => format!("Se crearon {} usuarios correctamente.", n),
    }
}

pub fn assign_request(group_id: Option<String>, reason: &str) -> Option<AssignGroupRequest> {
    let group_id = group_id.filter(|id| !id.trim().is_empty())?;
    let reason = reason.trim();
    Some(AssignGroupRequest {
        group_id,
        reason: (!reason.is_empty()).then(|| reason.to_string()),
    })
}
