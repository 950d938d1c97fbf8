// libs/appointment-cell/src/services/remote.rs
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, warn};

use shared_config::AppConfig;

use crate::models::{AppointmentPayload, RemoteServiceError};

pub const APPOINTMENT_PATH: &str = "/userAppointment/appointment";

/// The backend that accepts booking requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentService: Send + Sync {
    /// Sends one booking request. No retries.
    async fn book(&self, payload: &AppointmentPayload) -> Result<(), RemoteServiceError>;
}

/// Maps a booking response status onto the service contract.
///
/// The backend answers 404 when the requested slot is already taken, not
/// when a resource is missing. Only 200 counts as accepted.
pub fn translate_status(status: StatusCode) -> Result<(), RemoteServiceError> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND => Err(RemoteServiceError::SlotConflict),
        other => Err(RemoteServiceError::UnexpectedStatus(other.as_u16())),
    }
}

pub struct HttpAppointmentService {
    client: Client,
    endpoint: String,
}

impl HttpAppointmentService {
    pub fn new(config: &AppConfig) -> Result<Self, RemoteServiceError> {
        if !config.is_configured() {
            warn!("Booking API base URL is not configured");
        }

        let client = Client::builder().timeout(config.request_timeout()).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint(APPOINTMENT_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AppointmentService for HttpAppointmentService {
    async fn book(&self, payload: &AppointmentPayload) -> Result<(), RemoteServiceError> {
        debug!("Sending booking request to: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Booking request failed: {}", e);
                RemoteServiceError::from(e)
            })?;

        let status = response.status();
        debug!("Booking response status: {}", status);

        translate_status(status)
    }
}
