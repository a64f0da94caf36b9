use thiserror::Error;

/// Rejected user input for prompts and folders.
///
/// Always produced before any state is touched, so callers can surface it
/// directly next to the offending form field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong { field: &'static str, max: usize, actual: usize },

    #[error("folder name {0:?} is reserved")]
    ReservedFolderName(String),

    #[error("a folder named {0:?} already exists")]
    DuplicateFolderName(String),

    #[error("built-in folder {0:?} cannot be changed")]
    BuiltinFolder(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check a required text field: non-blank and within `max` characters.
pub(crate) fn require_text(field: &'static str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    check_len(field, value, max)
}

/// Check an optional text field against `max` characters.
pub(crate) fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> ValidationResult<()> {
    value.map_or(Ok(()), |v| check_len(field, v, max))
}

fn check_len(field: &'static str, value: &str, max: usize) -> ValidationResult<()> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_field_is_empty() {
        assert_eq!(require_text("title", "   ", 10), Err(ValidationError::Empty { field: "title" }));
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        assert!(require_text("title", "ééééé", 5).is_ok());
        assert_eq!(
            require_text("title", "éééééé", 5),
            Err(ValidationError::TooLong { field: "title", max: 5, actual: 6 })
        );
    }

    #[test]
    fn missing_optional_field_passes() {
        assert!(optional_text("notes", None, 1).is_ok());
        assert!(optional_text("notes", Some(""), 1).is_ok());
        assert!(optional_text("notes", Some("ab"), 1).is_err());
    }
}
