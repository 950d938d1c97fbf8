use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SESSION_STORE_PATH: &str = ".clinic-session.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub booking_api_base_url: String,
    pub request_timeout_secs: u64,
    pub session_store_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            booking_api_base_url: env::var("BOOKING_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("BOOKING_API_BASE_URL not set, using empty value");
                    String::new()
                }),
            request_timeout_secs: env::var("BOOKING_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|raw| match raw.parse::<u64>() {
                    Ok(0) | Err(_) => {
                        warn!("BOOKING_REQUEST_TIMEOUT_SECS={} is not a positive integer, using default", raw);
                        None
                    }
                    Ok(secs) => Some(secs),
                })
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            session_store_path: env::var("SESSION_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("SESSION_STORE_PATH not set, using default");
                    PathBuf::from(DEFAULT_SESSION_STORE_PATH)
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.booking_api_base_url.is_empty()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Joins an API path onto the configured base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.booking_api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            booking_api_base_url: String::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_store_path: PathBuf::from(DEFAULT_SESSION_STORE_PATH),
        }
    }
}
