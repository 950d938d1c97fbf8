pub mod error;
pub mod services;

pub use error::AuthError;
pub use services::auth::AuthClient;
pub use services::session::{SessionStore, EMAIL_KEY};
