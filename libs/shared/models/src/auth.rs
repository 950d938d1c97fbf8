use serde::{Deserialize, Serialize};

/// Body of `POST /userAppointment/login`. The backend expects the mixed-case
/// keys exactly as written here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// Body of `POST /userAppointment/register`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}
