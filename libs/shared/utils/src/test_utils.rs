use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use serde_json::json;
use tempfile::TempDir;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::RegisterRequest;
use shared_models::format_appointment_date;

pub struct TestConfig {
    pub booking_api_base_url: String,
    pub request_timeout_secs: u64,
    pub session_store_path: PathBuf,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            booking_api_base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 5,
            session_store_path: std::env::temp_dir()
                .join(format!("clinic-session-{}.json", Uuid::new_v4())),
        }
    }
}

impl TestConfig {
    /// Points the config at a mock server, e.g. `MockServer::uri()`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            booking_api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_session_dir(mut self, dir: &TempDir) -> Self {
        self.session_store_path = dir.path().join("session.json");
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            booking_api_base_url: self.booking_api_base_url.clone(),
            request_timeout_secs: self.request_timeout_secs,
            session_store_path: self.session_store_path.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            password: "correct-horse-battery".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(full_name: &str, email: &str, password: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    pub fn to_register_request(&self) -> RegisterRequest {
        RegisterRequest {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.password.clone(),
        }
    }
}

/// Field values for a fully populated booking, matching the sample
/// appointment used across the booking tests.
pub struct SampleBooking;

impl SampleBooking {
    pub const PATIENT_NAME: &'static str = "Asha";
    pub const CONTACT_NUMBER: &'static str = "5551234";
    pub const TIME_SLOT: &'static str = "10:00 AM";
    pub const REASON: &'static str = "checkup";
    pub const RATING: u8 = 4;

    /// A date safely in the future relative to the machine clock.
    pub fn future_date() -> NaiveDate {
        Local::now().date_naive() + Duration::days(7)
    }

    pub fn yesterday() -> NaiveDate {
        Local::now().date_naive() - Duration::days(1)
    }

    pub fn expected_payload(email: Option<&str>, date: NaiveDate) -> serde_json::Value {
        json!({
            "FullName": Self::PATIENT_NAME,
            "Email": email,
            "PhoneNo": Self::CONTACT_NUMBER,
            "Date_of_Appointment": format_appointment_date(date),
            "Time_of_Appointment": Self::TIME_SLOT,
            "Reason_for_booking": Self::REASON,
            "Feedback_Rating": Self::RATING
        })
    }
}

pub struct MockApiResponses;

impl MockApiResponses {
    pub fn appointment_accepted() -> serde_json::Value {
        json!({
            "message": "Appointment booked successfully",
            "id": Uuid::new_v4()
        })
    }

    pub fn slot_taken() -> serde_json::Value {
        json!({
            "message": "Appointment already exists for this slot"
        })
    }

    pub fn login_success(email: &str) -> serde_json::Value {
        json!({
            "message": "Login successful",
            "email": email
        })
    }

    pub fn registered(email: &str) -> serde_json::Value {
        json!({
            "message": "User registered",
            "email": email
        })
    }

    pub fn error_response(message: &str) -> serde_json::Value {
        json!({
            "error": message
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::with_base_url("http://127.0.0.1:9999").with_timeout_secs(2);
        let app_config = config.to_app_config();

        assert_eq!(app_config.booking_api_base_url, "http://127.0.0.1:9999");
        assert_eq!(app_config.request_timeout_secs, 2);
        assert!(app_config.is_configured());
    }

    #[test]
    fn test_user_register_request_confirms_password() {
        let request = TestUser::new("Ravi", "ravi@example.com", "pw").to_register_request();
        assert_eq!(request.password, request.confirm_password);
        assert_eq!(request.email, "ravi@example.com");
    }
}
