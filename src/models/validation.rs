use thiserror::Error;

/// A rejected form field. Every variant is shown to the user as the same
/// "Invalid input." notice; the detail only reaches the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("'{0}' is not a boolean token")]
    InvalidFlag(String),
}

/// Parses a boolean-ish form token, case-insensitively.
pub fn parse_flag(token: &str) -> Result<bool, ValidationError> {
    match token.to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Ok(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Ok(false),
        _ => Err(ValidationError::InvalidFlag(token.to_string())),
    }
}

/// Requires a present, non-empty value of at most `max` characters.
pub fn require_text<'a>(
    field: &'static str,
    value: Option<&'a str>,
    max: usize,
) -> Result<&'a str, ValidationError> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField { field })?;

    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(value)
}
