/// Source of the bearer credentials attached to outgoing requests.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;

    fn token_type(&self) -> String {
        "bearer".to_string()
    }
}

/// Provider for clients that never authenticate.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnonymousToken;

impl TokenProvider for AnonymousToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// `bearer` -> `Bearer`, `BEARER` -> `Bearer`, empty -> `Bearer`.
pub fn format_token_type(token_type: &str) -> String {
    let lower = token_type.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Bearer".to_string(),
    }
}

pub fn authorization_value(token_type: &str, token: &str) -> String {
    format!("{} {}", format_token_type(token_type), token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_is_capitalized() {
        assert_eq!(format_token_type("bearer"), "Bearer");
        assert_eq!(format_token_type("BEARER"), "Bearer");
        assert_eq!(format_token_type("mac"), "Mac");
    }

    #[test]
    fn empty_scheme_defaults_to_bearer() {
        assert_eq!(format_token_type(""), "Bearer");
        assert_eq!(authorization_value("", "abc"), "Bearer abc");
    }
}
