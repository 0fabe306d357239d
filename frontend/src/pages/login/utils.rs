use leptos::*;

use crate::api::LoginRequest;

pub const LOGIN_FALLBACK_ERROR: &str = "Error al iniciar sesión";

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub identification: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            identification: create_rw_signal(String::new()),
        }
    }
}

impl LoginFormState {
    pub fn to_request(&self) -> Result<LoginRequest, String> {
        let identification = validate_identification(&self.identification.get_untracked())?;
        Ok(LoginRequest { identification })
    }
}

pub fn validate_identification(raw: &str) -> Result<String, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("Por favor ingresa tu número de identificación".into());
    }
    if value.chars().any(char::is_whitespace) {
        return Err("La identificación no debe contener espacios".into());
    }
    Ok(value.to_string())
}

pub fn login_error_message(message: &str) -> String {
    if message.trim().is_empty() {
        LOGIN_FALLBACK_ERROR.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identification_is_trimmed_and_required() {
        assert_eq!(validate_identification(" 1001 ").as_deref(), Ok("1001"));
        assert!(validate_identification("   ").is_err());
        assert!(validate_identification("10 01").is_err());
    }

    #[test]
    fn blank_server_message_falls_back() {
        assert_eq!(login_error_message(""), LOGIN_FALLBACK_ERROR);
        assert_eq!(login_error_message("Usuario no encontrado"), "Usuario no encontrado");
    }
}
