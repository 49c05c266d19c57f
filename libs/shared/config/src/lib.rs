use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_SESSION_PATH: &str = ".turnoplus/session.json";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_path: PathBuf,
    pub http_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_base_url = env::var("API_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| {
                env::var("NG_APP_API_BASE_URL")
                    .ok()
                    .filter(|value| !value.trim().is_empty())
            })
            .unwrap_or_else(|| {
                warn!("API_BASE_URL not set, using {}", DEFAULT_API_BASE_URL);
                DEFAULT_API_BASE_URL.to_string()
            });

        let session_path = env::var("TURNOPLUS_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                warn!("TURNOPLUS_SESSION_PATH not set, using default");
                PathBuf::from(DEFAULT_SESSION_PATH)
            });

        let http_timeout_secs = match env::var("TURNOPLUS_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("TURNOPLUS_HTTP_TIMEOUT_SECS is not a number: {}", raw);
                DEFAULT_HTTP_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Self {
            api_base_url: normalize_base_url(&api_base_url),
            session_path,
            http_timeout_secs,
        }
    }

    /// Config pointing at an explicit base URL, everything else defaulted.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: normalize_base_url(base_url),
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty()
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
