pub mod auth;
pub mod booking;
pub mod navigation;

pub use booking::format_appointment_date;
pub use navigation::Route;
