//! Common validation utilities.

use validator::ValidationError;

/// Maximum length for free-text fields (notes, addresses, reply bodies).
const MAX_TEXT_LENGTH: usize = 10_000;

/// Validates that a required text field is non-empty after trimming.
pub fn validate_required_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Field must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a free-text field stays within the storage limit.
pub fn validate_text_length(value: &str) -> Result<(), ValidationError> {
    if value.len() > MAX_TEXT_LENGTH {
        let mut err = ValidationError::new("too_long");
        err.message = Some("Text exceeds maximum length".into());
        return Err(err);
    }
    Ok(())
}

/// Case-insensitive substring match used by the listing search contract.
///
/// The SQL layer implements this with `ILIKE '%term%'`; this helper is the
/// in-process reference for that behavior.
pub fn matches_search(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_rejects_empty() {
        assert!(validate_required_text("").is_err());
        assert!(validate_required_text("   ").is_err());
        assert!(validate_required_text("Budi").is_ok());
    }

    #[test]
    fn test_text_length_limit() {
        assert!(validate_text_length(&"a".repeat(10_000)).is_ok());
        assert!(validate_text_length(&"a".repeat(10_001)).is_err());
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        assert!(matches_search("John Doe", "john"));
        assert!(matches_search("john@x.com", "JOHN"));
        assert!(matches_search("Siti Rahma", "rahma"));
        assert!(!matches_search("John Doe", "jane"));
    }

    #[test]
    fn test_search_empty_term_matches_everything() {
        assert!(matches_search("anything", ""));
    }
}
