pub const PIN_LENGTH: usize = 4;

pub fn validate_pin(raw: &str) -> Result<String, String> {
    let pin = raw.trim();
    if pin.len() == PIN_LENGTH && pin.chars().all(|c| c.is_ascii_digit()) {
        Ok(pin.to_string())
    } else {
        Err(format!("El PIN debe tener {} dígitos", PIN_LENGTH))
    }
}

/// Keeps only digits, truncated to the PIN length, as the user types.
pub fn sanitize_pin_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(PIN_LENGTH)
        .collect()
}
