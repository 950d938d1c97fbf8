// libs/appointment-cell/src/services/booking.rs
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use auth_cell::SessionStore;
use shared_config::AppConfig;

use crate::models::{
    AppointmentError, BookingDraft, BookingField, BookingState, RemoteServiceError,
    SubmissionOutcome, TimeSlot, MISSING_FIELDS_MESSAGE, SLOT_CONFLICT_MESSAGE,
    TRANSIENT_FAILURE_MESSAGE,
};
use crate::services::rating::RatingCapture;
use crate::services::remote::{AppointmentService, HttpAppointmentService};
use crate::services::slot::SlotSelector;

#[derive(Debug, Default)]
struct FormInner {
    patient_name: String,
    contact_number: String,
    reason_for_booking: String,
    slots: SlotSelector,
    rating: RatingCapture,
    state: BookingState,
}

impl FormInner {
    fn draft(&self) -> BookingDraft {
        BookingDraft {
            patient_name: self.patient_name.clone(),
            contact_number: self.contact_number.clone(),
            appointment_date: self.slots.date(),
            appointment_time_slot: self.slots.time_slot(),
            reason_for_booking: self.reason_for_booking.clone(),
            feedback_rating: self.rating.value(),
        }
    }

    fn reset_draft(&mut self) {
        self.patient_name.clear();
        self.contact_number.clear();
        self.reason_for_booking.clear();
        self.slots.reset();
        self.rating.reset();
    }
}

/// Drives one visit to the booking screen.
///
/// Holds the draft, talks to the appointment backend and exposes the
/// resulting [`BookingState`]. At most one submission is in flight at a time.
pub struct BookingFormController {
    service: Arc<dyn AppointmentService>,
    session: SessionStore,
    inner: Mutex<FormInner>,
}

impl BookingFormController {
    pub fn new(service: Arc<dyn AppointmentService>, session: SessionStore) -> Self {
        Self {
            service,
            session,
            inner: Mutex::new(FormInner::default()),
        }
    }

    pub fn from_config(config: &AppConfig, session: SessionStore) -> Result<Self, RemoteServiceError> {
        let service = HttpAppointmentService::new(config)?;
        Ok(Self::new(Arc::new(service), session))
    }

    // The lock is never held across an await, so a poisoned guard still
    // holds consistent data.
    fn inner(&self) -> MutexGuard<'_, FormInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> BookingState {
        self.inner().state.clone()
    }

    pub fn draft(&self) -> BookingDraft {
        self.inner().draft()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.inner().state, BookingState::Submitting)
    }

    pub fn is_date_picker_open(&self) -> bool {
        self.inner().slots.is_date_picker_open()
    }

    pub fn update_field(&self, field: BookingField, value: impl Into<String>) {
        let value = value.into();
        let mut inner = self.inner();
        match field {
            BookingField::PatientName => inner.patient_name = value,
            BookingField::ContactNumber => inner.contact_number = value,
            BookingField::ReasonForBooking => inner.reason_for_booking = value,
        }
    }

    pub fn open_date_picker(&self) {
        self.inner().slots.open_date_picker();
    }

    pub fn dismiss_date_picker(&self) {
        self.inner().slots.dismiss_date_picker();
    }

    pub fn confirm_date(&self, selected: Option<NaiveDate>) -> Result<(), AppointmentError> {
        self.inner().slots.confirm_date(selected)
    }

    pub fn confirm_date_at(
        &self,
        selected: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<(), AppointmentError> {
        self.inner().slots.confirm_date_at(selected, today)
    }

    pub fn select_time_slot(&self, slot: Option<TimeSlot>) {
        self.inner().slots.select_time_slot(slot);
    }

    pub fn select_time_slot_label(&self, label: &str) -> Result<(), AppointmentError> {
        self.inner().slots.select_time_slot_label(label)
    }

    pub fn set_rating(&self, rating: i64) -> Result<u8, AppointmentError> {
        self.inner().rating.on_change(rating)
    }

    pub fn set_rating_fractional(&self, rating: f64) -> Result<u8, AppointmentError> {
        self.inner().rating.on_change_fractional(rating)
    }

    /// Dismisses the conflict panel. The draft is kept so another slot can
    /// be picked. Returns false when no conflict was showing.
    pub fn close_conflict(&self) -> bool {
        let mut inner = self.inner();
        if matches!(inner.state, BookingState::Conflict(_)) {
            inner.state = BookingState::Form;
            true
        } else {
            false
        }
    }

    /// Clears a transient failure notice. Returns false when none was showing.
    pub fn dismiss_error(&self) -> bool {
        let mut inner = self.inner();
        if matches!(inner.state, BookingState::Error(_)) {
            inner.state = BookingState::Form;
            true
        } else {
            false
        }
    }

    /// Submits the current draft.
    ///
    /// Local rejections (incomplete draft, a submission already running, the
    /// screen showing a result panel) come back as `Err` and never reach the
    /// network. Everything that did reach the network is an `Ok` outcome.
    pub async fn submit(&self) -> Result<SubmissionOutcome, AppointmentError> {
        let draft = {
            let mut inner = self.inner();

            match &inner.state {
                BookingState::Submitting => {
                    debug!("Submit ignored, a submission is already in flight");
                    return Err(AppointmentError::SubmissionInProgress);
                }
                state if !state.accepts_submission() => {
                    return Err(AppointmentError::NotAcceptingSubmissions(state.clone()));
                }
                _ => {}
            }

            let draft = inner.draft();
            let missing = draft.missing_fields();
            if !missing.is_empty() {
                debug!("Booking draft incomplete, missing: {}", missing.join(", "));
                return Err(AppointmentError::ValidationError(MISSING_FIELDS_MESSAGE.to_string()));
            }

            inner.state = BookingState::Submitting;
            draft
        };

        let guard = SubmittingGuard { inner: &self.inner };
        let attempt_id = Uuid::new_v4();

        let email = self.session.get().await;
        if email.is_none() {
            warn!("Submitting booking {} without a session email", attempt_id);
        }

        let payload = draft.to_payload(email)?;
        info!(
            "Submitting booking {} for {} at {}",
            attempt_id, payload.date_of_appointment, payload.time_of_appointment
        );
        debug!("Booking {} payload: {:?}", attempt_id, payload);

        let result = self.service.book(&payload).await;

        let (outcome, next_state) = match result {
            Ok(()) => {
                info!("Booking {} accepted", attempt_id);
                (
                    SubmissionOutcome::Success,
                    BookingState::Success {
                        feedback_rating: draft.feedback_rating,
                    },
                )
            }
            Err(RemoteServiceError::SlotConflict) => {
                warn!("Booking {} rejected, slot already taken", attempt_id);
                (
                    SubmissionOutcome::SlotConflict(SLOT_CONFLICT_MESSAGE.to_string()),
                    BookingState::Conflict(SLOT_CONFLICT_MESSAGE.to_string()),
                )
            }
            Err(e) => {
                error!("Booking {} failed: {}", attempt_id, e);
                (
                    SubmissionOutcome::TransientFailure(TRANSIENT_FAILURE_MESSAGE.to_string()),
                    BookingState::Error(TRANSIENT_FAILURE_MESSAGE.to_string()),
                )
            }
        };

        guard.finish(next_state, outcome.is_success());
        Ok(outcome)
    }
}

/// Leaves the submitting state however `submit` exits, including when its
/// future is dropped mid-request.
struct SubmittingGuard<'a> {
    inner: &'a Mutex<FormInner>,
}

impl SubmittingGuard<'_> {
    fn finish(self, next_state: BookingState, reset_draft: bool) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if reset_draft {
            inner.reset_draft();
        }
        inner.state = next_state;
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(inner.state, BookingState::Submitting) {
            inner.state = BookingState::Form;
        }
    }
}
