use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Maps a non-success response onto the matching variant. FastAPI wraps
    /// messages as `{"detail": ...}`, which is unwrapped when present.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_detail(body);
        match status.as_u16() {
            401 | 403 => AppError::Auth(message),
            404 => AppError::NotFound(message),
            400 | 422 => AppError::Validation(message),
            409 => AppError::Conflict(message),
            code => AppError::Api {
                status: code,
                message,
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Auth(_) => Some(401),
            AppError::NotFound(_) => Some(404),
            AppError::Validation(_) => Some(422),
            AppError::Conflict(_) => Some(409),
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

fn extract_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}

/// A form rejected before anything is sent. The message is user facing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FormError(pub String);

impl FormError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_unwrapped() {
        let err = AppError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail":"Overlapping availability slot"}"#,
        );
        match err {
            AppError::Validation(message) => assert_eq!(message, "Overlapping availability slot"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn unknown_status_keeps_raw_body() {
        let err = AppError::from_status(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), "API error (502): upstream down");
    }

    #[test]
    fn forbidden_maps_to_auth() {
        let err = AppError::from_status(StatusCode::FORBIDDEN, "{}");
        assert!(matches!(err, AppError::Auth(_)));
    }
}
