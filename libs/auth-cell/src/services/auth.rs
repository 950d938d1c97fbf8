// libs/auth-cell/src/services/auth.rs
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, warn};

use shared_config::AppConfig;
use shared_models::auth::{LoginRequest, RegisterRequest};
use shared_models::Route;

use crate::error::AuthError;
use crate::services::session::SessionStore;

const LOGIN_PATH: &str = "/userAppointment/login";
const REGISTER_PATH: &str = "/userAppointment/register";

/// Client for the account endpoints of the appointment backend.
pub struct AuthClient {
    client: Client,
    config: Arc<AppConfig>,
    session: SessionStore,
}

impl AuthClient {
    pub fn new(config: Arc<AppConfig>, session: SessionStore) -> Result<Self, AuthError> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;

        Ok(Self {
            client,
            config,
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Logs in and caches the email for later bookings.
    ///
    /// Every backend or transport failure is reported as
    /// [`AuthError::InvalidCredentials`]; the underlying cause is only logged.
    pub async fn login(&self, email: &str, password: &str) -> Result<Route, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let url = self.config.endpoint(LOGIN_PATH);
        debug!("Sending login request to: {}", url);

        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Login request failed: {}", e);
                return Err(AuthError::InvalidCredentials);
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Login rejected with status {}", status);
            return Err(AuthError::InvalidCredentials);
        }

        if let Err(e) = self.session.set(email).await {
            error!("Failed to persist session email: {}", e);
        }

        info!("Login successful");
        Ok(Route::BookAppointment)
    }

    /// Registers a new account. On success the caller should show the login
    /// screen; registration does not start a session.
    pub async fn register(&self, form: &RegisterRequest) -> Result<Route, AuthError> {
        if form.password != form.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        if form.full_name.is_empty() || form.email.is_empty() || form.password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let url = self.config.endpoint(REGISTER_PATH);
        debug!("Sending registration request to: {}", url);

        let response = match self.client.post(&url).json(form).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Registration request failed: {}", e);
                return Err(AuthError::RegistrationFailed);
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            error!("Registration failed ({}): {}", status, error_text);
            return Err(AuthError::RegistrationFailed);
        }

        info!("Registration successful");
        Ok(Route::Login)
    }
}
