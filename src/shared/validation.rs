use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for validating prompt keys
    /// Must start with a letter or digit and contain only letters, digits, `_`, `-` and `.`
    /// - Valid: "greeting", "strategy_planning", "simple-chat", "agent.v2"
    /// - Invalid: "_greeting", "with space", "a/b", "", "key?x"
    pub static ref PROMPT_KEY_REGEX: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.\-]*$").unwrap();
}

/// Reject values that are empty once surrounding whitespace is removed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Parse the boolean spellings HTML forms and env files use.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_key_regex_valid() {
        assert!(PROMPT_KEY_REGEX.is_match("greeting"));
        assert!(PROMPT_KEY_REGEX.is_match("strategy_planning"));
        assert!(PROMPT_KEY_REGEX.is_match("simple-chat"));
        assert!(PROMPT_KEY_REGEX.is_match("agent.v2"));
        assert!(PROMPT_KEY_REGEX.is_match("A1"));
    }

    #[test]
    fn test_prompt_key_regex_invalid() {
        assert!(!PROMPT_KEY_REGEX.is_match("")); // empty
        assert!(!PROMPT_KEY_REGEX.is_match("_greeting")); // starts with underscore
        assert!(!PROMPT_KEY_REGEX.is_match("with space")); // space
        assert!(!PROMPT_KEY_REGEX.is_match("a/b")); // path separator
        assert!(!PROMPT_KEY_REGEX.is_match("key?x")); // query character
        assert!(!PROMPT_KEY_REGEX.is_match("<script>")); // markup
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Hello, customer.").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("  \n\t ").is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" ON "), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }
}
