/// Input validation utilities shared by the request DTOs.
use uuid::Uuid;
use validator::ValidationError;

use crate::error::AppError;

/// Returns true when the value still has content after trimming.
pub fn non_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Custom rule for `#[validate(custom(...))]` fields: required text must be
/// non-empty after trimming. The caller attaches the user-facing message.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if non_blank(value) {
        Ok(())
    } else {
        Err(ValidationError::new("not_blank"))
    }
}

/// Parses a path identifier, mapping malformed input to a 400 with the
/// given message (e.g. "Invalid video id").
pub fn parse_id(raw: &str, message: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank_accepts_content() {
        assert!(non_blank("hello"));
        assert!(non_blank("  padded  "));
    }

    #[test]
    fn test_non_blank_rejects_whitespace() {
        assert!(!non_blank(""));
        assert!(!non_blank("   "));
        assert!(!non_blank("\t\n"));
    }

    #[test]
    fn test_not_blank_rule() {
        assert!(not_blank("content").is_ok());
        assert!(not_blank("  ").is_err());
    }

    #[test]
    fn test_parse_id_valid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "Invalid id").unwrap(), id);
    }

    #[test]
    fn test_parse_id_invalid() {
        let err = parse_id("not-a-uuid", "Invalid video id").unwrap_err();
        assert_eq!(err.to_string(), "Invalid video id");
    }
}
