// libs/appointment-cell/src/models.rs
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub use shared_models::format_appointment_date;

pub const SLOT_CONFLICT_MESSAGE: &str = "Appointment already booked for this time slot.";
pub const TRANSIENT_FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill all the fields";

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

// ==============================================================================
// TIME SLOTS
// ==============================================================================

/// The fixed hourly appointment windows offered by the clinic.
///
/// Serialized as its display label, e.g. `"10:00 AM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeSlot {
    NineAm,
    TenAm,
    ElevenAm,
    TwelvePm,
    OnePm,
    TwoPm,
    ThreePm,
    FourPm,
    FivePm,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 9] = [
        TimeSlot::NineAm,
        TimeSlot::TenAm,
        TimeSlot::ElevenAm,
        TimeSlot::TwelvePm,
        TimeSlot::OnePm,
        TimeSlot::TwoPm,
        TimeSlot::ThreePm,
        TimeSlot::FourPm,
        TimeSlot::FivePm,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::NineAm => "9:00 AM",
            TimeSlot::TenAm => "10:00 AM",
            TimeSlot::ElevenAm => "11:00 AM",
            TimeSlot::TwelvePm => "12:00 PM",
            TimeSlot::OnePm => "1:00 PM",
            TimeSlot::TwoPm => "2:00 PM",
            TimeSlot::ThreePm => "3:00 PM",
            TimeSlot::FourPm => "4:00 PM",
            TimeSlot::FivePm => "5:00 PM",
        }
    }

    /// Hour of day (24h clock) at which the slot starts.
    pub fn hour(&self) -> u32 {
        match self {
            TimeSlot::NineAm => 9,
            TimeSlot::TenAm => 10,
            TimeSlot::ElevenAm => 11,
            TimeSlot::TwelvePm => 12,
            TimeSlot::OnePm => 13,
            TimeSlot::TwoPm => 14,
            TimeSlot::ThreePm => 15,
            TimeSlot::FourPm => 16,
            TimeSlot::FivePm => 17,
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeSlot {
    type Err = AppointmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSlot::ALL
            .iter()
            .copied()
            .find(|slot| slot.label() == s.trim())
            .ok_or_else(|| AppointmentError::InvalidTimeSlot(s.to_string()))
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse::<TimeSlot>().map_err(de::Error::custom)
    }
}

// ==============================================================================
// BOOKING DRAFT
// ==============================================================================

/// Free-text fields of the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    PatientName,
    ContactNumber,
    ReasonForBooking,
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingField::PatientName => write!(f, "patient_name"),
            BookingField::ContactNumber => write!(f, "contact_number"),
            BookingField::ReasonForBooking => write!(f, "reason_for_booking"),
        }
    }
}

/// Snapshot of the in-progress booking form.
///
/// `feedback_rating` is 0 until the patient rates their experience.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub patient_name: String,
    pub contact_number: String,
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time_slot: Option<TimeSlot>,
    pub reason_for_booking: String,
    pub feedback_rating: u8,
}

impl BookingDraft {
    /// Names of the fields that still block submission.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.patient_name.is_empty() {
            missing.push("patient_name");
        }
        if self.contact_number.is_empty() {
            missing.push("contact_number");
        }
        if self.appointment_date.is_none() {
            missing.push("appointment_date");
        }
        if self.appointment_time_slot.is_none() {
            missing.push("appointment_time_slot");
        }
        if self.reason_for_booking.is_empty() {
            missing.push("reason_for_booking");
        }
        if self.feedback_rating == 0 {
            missing.push("feedback_rating");
        }

        missing
    }

    pub fn is_submittable(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Maps the draft onto the wire schema. Fails when the draft is not
    /// submittable.
    pub fn to_payload(&self, email: Option<String>) -> Result<AppointmentPayload, AppointmentError> {
        let (date, time_slot) = match (self.appointment_date, self.appointment_time_slot) {
            (Some(date), Some(slot)) if self.is_submittable() => (date, slot),
            _ => return Err(AppointmentError::ValidationError(MISSING_FIELDS_MESSAGE.to_string())),
        };

        if !(MIN_RATING..=MAX_RATING).contains(&self.feedback_rating) {
            return Err(AppointmentError::InvalidRating(self.feedback_rating.to_string()));
        }

        Ok(AppointmentPayload {
            full_name: self.patient_name.clone(),
            email,
            phone_no: self.contact_number.clone(),
            date_of_appointment: format_appointment_date(date),
            time_of_appointment: time_slot,
            reason_for_booking: self.reason_for_booking.clone(),
            feedback_rating: self.feedback_rating,
        })
    }
}

// ==============================================================================
// WIRE MODELS
// ==============================================================================

/// Body of `POST /userAppointment/appointment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentPayload {
    #[serde(rename = "FullName")]
    pub full_name: String,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "PhoneNo")]
    pub phone_no: String,
    #[serde(rename = "Date_of_Appointment")]
    pub date_of_appointment: String,
    #[serde(rename = "Time_of_Appointment")]
    pub time_of_appointment: TimeSlot,
    #[serde(rename = "Reason_for_booking")]
    pub reason_for_booking: String,
    #[serde(rename = "Feedback_Rating")]
    pub feedback_rating: u8,
}

// ==============================================================================
// OUTCOMES AND SCREEN STATE
// ==============================================================================

/// Result of one submission attempt that reached the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    SlotConflict(String),
    TransientFailure(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Success => None,
            SubmissionOutcome::SlotConflict(msg) | SubmissionOutcome::TransientFailure(msg) => Some(msg),
        }
    }
}

/// What the booking screen is currently showing.
///
/// `Error` is the form with a failure notice on top; the form stays editable
/// and can be resubmitted from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BookingState {
    #[default]
    Form,
    Submitting,
    Success { feedback_rating: u8 },
    Conflict(String),
    Error(String),
}

impl BookingState {
    pub fn accepts_submission(&self) -> bool {
        matches!(self, BookingState::Form | BookingState::Error(_))
    }
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingState::Form => write!(f, "form"),
            BookingState::Submitting => write!(f, "submitting"),
            BookingState::Success { .. } => write!(f, "success"),
            BookingState::Conflict(_) => write!(f, "conflict"),
            BookingState::Error(_) => write!(f, "error"),
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

/// Local rejections. None of these involve the remote service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentError {
    #[error("{0}")]
    ValidationError(String),

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("Booking form is not accepting submissions in state: {0}")]
    NotAcceptingSubmissions(BookingState),

    #[error("Appointment date {0} is in the past")]
    PastDate(NaiveDate),

    #[error("Date picker is not open")]
    PickerNotOpen,

    #[error("Invalid time slot: {0}")]
    InvalidTimeSlot(String),

    #[error("Rating must be a whole number from 1 to 5, got {0}")]
    InvalidRating(String),
}

/// Failures talking to the appointment backend.
#[derive(Debug, thiserror::Error)]
pub enum RemoteServiceError {
    #[error("Appointment slot not available")]
    SlotConflict,

    #[error("Unexpected response status: {0}")]
    UnexpectedStatus(u16),

    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for RemoteServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteServiceError::Timeout
        } else {
            RemoteServiceError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_draft() -> BookingDraft {
        BookingDraft {
            patient_name: "Asha".to_string(),
            contact_number: "5551234".to_string(),
            appointment_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            appointment_time_slot: Some(TimeSlot::TenAm),
            reason_for_booking: "checkup".to_string(),
            feedback_rating: 4,
        }
    }

    #[test]
    fn time_slots_cover_nine_to_five_hourly() {
        let hours: Vec<u32> = TimeSlot::ALL.iter().map(|s| s.hour()).collect();
        assert_eq!(hours, (9..=17).collect::<Vec<_>>());
        assert_eq!(TimeSlot::TwelvePm.label(), "12:00 PM");
    }

    #[test]
    fn time_slot_parses_only_known_labels() {
        assert_eq!("10:00 AM".parse::<TimeSlot>().unwrap(), TimeSlot::TenAm);
        assert_eq!(" 1:00 PM ".parse::<TimeSlot>().unwrap(), TimeSlot::OnePm);
        assert!("10:30 AM".parse::<TimeSlot>().is_err());
        assert!("6:00 PM".parse::<TimeSlot>().is_err());
        assert!("".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn time_slot_wire_form_is_its_label() {
        for slot in TimeSlot::ALL {
            let value = serde_json::to_value(slot).unwrap();
            assert_eq!(value, json!(slot.label()));
            assert_eq!(serde_json::from_value::<TimeSlot>(value).unwrap(), slot);
        }
        assert!(serde_json::from_value::<TimeSlot>(json!("6:00 PM")).is_err());
    }

    #[test]
    fn state_defaults_to_form() {
        assert_eq!(BookingState::default(), BookingState::Form);
    }

    #[test]
    fn empty_draft_reports_every_field_missing() {
        let draft = BookingDraft::default();
        assert_eq!(draft.missing_fields().len(), 6);
        assert!(!draft.is_submittable());
    }

    #[test]
    fn zero_rating_blocks_submission() {
        let draft = BookingDraft {
            feedback_rating: 0,
            ..complete_draft()
        };
        assert_eq!(draft.missing_fields(), vec!["feedback_rating"]);
    }

    #[test]
    fn payload_matches_wire_schema() {
        let payload = complete_draft()
            .to_payload(Some("asha@example.com".to_string()))
            .unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "FullName": "Asha",
                "Email": "asha@example.com",
                "PhoneNo": "5551234",
                "Date_of_Appointment": "6/1/2025",
                "Time_of_Appointment": "10:00 AM",
                "Reason_for_booking": "checkup",
                "Feedback_Rating": 4
            })
        );
    }

    #[test]
    fn missing_email_serializes_as_null() {
        let payload = complete_draft().to_payload(None).unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value["Email"].is_null());
    }

    #[test]
    fn incomplete_draft_has_no_payload() {
        let draft = BookingDraft {
            reason_for_booking: String::new(),
            ..complete_draft()
        };
        assert!(matches!(
            draft.to_payload(None),
            Err(AppointmentError::ValidationError(_))
        ));
    }

    #[test]
    fn out_of_range_rating_has_no_payload() {
        let draft = BookingDraft {
            feedback_rating: 9,
            ..complete_draft()
        };
        assert!(matches!(draft.to_payload(None), Err(AppointmentError::InvalidRating(_))));
    }

    #[test]
    fn only_form_and_error_accept_submissions() {
        assert!(BookingState::Form.accepts_submission());
        assert!(BookingState::Error("x".into()).accepts_submission());
        assert!(!BookingState::Submitting.accepts_submission());
        assert!(!BookingState::Success { feedback_rating: 3 }.accepts_submission());
        assert!(!BookingState::Conflict("x".into()).accepts_submission());
    }
}
