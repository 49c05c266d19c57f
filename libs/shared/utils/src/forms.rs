use std::sync::OnceLock;

use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
            .unwrap_or_else(|e| panic!("email pattern does not compile: {e}"))
    })
}

pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn meets_min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Trims the input; blank input becomes `None`.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    let normalized = value.unwrap_or_default().trim();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

/// Like [`normalize_optional`] but keeps surrounding whitespace, mirroring a
/// plain "empty string means unset" form field.
pub fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
