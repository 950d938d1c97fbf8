pub mod models;
pub mod services;

pub use models::*;
pub use services::booking::BookingFormController;
pub use services::rating::RatingCapture;
pub use services::remote::{translate_status, AppointmentService, HttpAppointmentService};
pub use services::slot::SlotSelector;
