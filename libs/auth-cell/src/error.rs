use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Please fill in all fields!")]
    MissingFields,

    #[error("Passwords do not match!")]
    PasswordMismatch,

    #[error("Invalid email or password!")]
    InvalidCredentials,

    #[error("Something went wrong. Please try again later.")]
    RegistrationFailed,

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}
