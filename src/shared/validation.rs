use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

lazy_static! {
    /// Characters with special meaning inside a SQL `LIKE` pattern
    pub static ref LIKE_SPECIAL_CHARS: Regex = Regex::new(r"[%_\\]").unwrap();
}

/// Rejects strings that are empty once surrounding whitespace is removed
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::Borrowed("must not be blank"));
        return Err(error);
    }
    Ok(())
}

/// Build a case-insensitive substring pattern for `ILIKE`, treating the
/// user's input literally
pub fn contains_pattern(input: &str) -> String {
    let escaped = LIKE_SPECIAL_CHARS.replace_all(input.trim(), r"\$0");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Hampi").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   \t").is_err());
    }

    #[test]
    fn test_contains_pattern_plain() {
        assert_eq!(contains_pattern("mysuru"), "%mysuru%");
        assert_eq!(contains_pattern("  mysuru "), "%mysuru%");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%"), r"%50\%%");
        assert_eq!(contains_pattern("a_b"), r"%a\_b%");
        assert_eq!(contains_pattern(r"c:\d"), r"%c:\\d%");
    }
}
