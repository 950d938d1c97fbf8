use chrono::{Datelike, NaiveDate};

/// Renders a date the way the booking backend stores it (en-US, no padding).
pub fn format_appointment_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}
