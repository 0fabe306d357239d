use leptos::*;

use crate::{
    api::{CreateSessionRequest, CreatedSession, Session},
    utils::time::local_inputs_to_utc,
};

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 100;

#[derive(Clone, Copy)]
pub struct SessionFormState {
    pub name: RwSignal<String>,
    pub start_date: RwSignal<String>,
    pub start_time: RwSignal<String>,
    pub end_date: RwSignal<String>,
    pub end_time: RwSignal<String>,
}

impl Default for SessionFormState {
    fn default() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            start_date: create_rw_signal(String::new()),
            start_time: create_rw_signal(String::new()),
            end_date: create_rw_signal(String::new()),
            end_time: create_rw_signal(String::new()),
        }
    }
}

impl SessionFormState {
    pub fn to_request(&self) -> Result<CreateSessionRequest, String> {
        build_session_request(
            &self.name.get_untracked(),
            (&self.start_date.get_untracked(), &self.start_time.get_untracked()),
            (&self.end_date.get_untracked(), &self.end_time.get_untracked()),
        )
    }

    pub fn reset(&self) {
        self.name.set(String::new());
        self.start_date.set(String::new());
        self.start_time.set(String::new());
        self.end_date.set(String::new());
        self.end_time.set(String::new());
    }
}

/// Validates the form inputs; dates are local to the app time zone.
pub fn build_session_request(
    name: &str,
    start: (&str, &str),
    end: (&str, &str),
) -> Result<CreateSessionRequest, String> {
    let name = name.trim();
    let chars = name.chars().count();
    if chars < NAME_MIN_CHARS {
        return Err("El nombre debe tener al menos 3 caracteres".into());
    }
    if chars > NAME_MAX_CHARS {
        return Err("El nombre no puede superar los 100 caracteres".into());
    }
    if start.0.trim().is_empty() || start.1.trim().is_empty() {
        return Err("La fecha y hora de inicio son requeridas".into());
    }
    if end.0.trim().is_empty() || end.1.trim().is_empty() {
        return Err("La fecha y hora de fin son requeridas".into());
    }
    let (Some(starts_at), Some(ends_at)) = (
        local_inputs_to_utc(start.0, start.1),
        local_inputs_to_utc(end.0, end.1),
    ) else {
        return Err("Fechas inválidas".into());
    };
    if ends_at <= starts_at {
        return Err("La fecha de fin debe ser posterior a la de inicio".into());
    }
    Ok(CreateSessionRequest {
        name: name.to_string(),
        starts_at,
        ends_at,
    })
}

/// What the QR modal shows. `qr_code` is present right after creation;
/// otherwise the image is fetched by `session_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrTarget {
    pub session_id: String,
    pub name: String,
    pub pin: Option<String>,
    pub qr_code: Option<String>,
}

impl QrTarget {
    pub fn from_session(session: &Session) -> Self {
        Self {
            session_id: qr_lookup_id(session),
            name: session.name.clone(),
            pin: session.session_pin.clone(),
            qr_code: None,
        }
    }

    pub fn from_created(created: &CreatedSession) -> Self {
        Self {
            qr_code: Some(created.qr_code.clone()),
            ..Self::from_session(&created.session)
        }
    }

    pub fn needs_fetch(&self) -> bool {
        self.qr_code.as_deref().map_or(true, |code| code.trim().is_empty())
    }
}

/// QR lookups use the public session code, falling back to the row id.
pub fn qr_lookup_id(session: &Session) -> String {
    if session.session_id.trim().is_empty() {
        session.id.clone()
    } else {
        session.session_id.clone()
    }
}

pub fn active_label(is_active: bool) -> &'static str {
    if is_active {
        "Activa"
    } else {
        "Inactiva"
    }
}
