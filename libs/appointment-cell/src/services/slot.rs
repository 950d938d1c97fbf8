// libs/appointment-cell/src/services/slot.rs
use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::models::{AppointmentError, TimeSlot};

/// Tracks the chosen appointment date and time slot, plus whether the date
/// picker is currently open.
#[derive(Debug, Clone, Default)]
pub struct SlotSelector {
    date: Option<NaiveDate>,
    time_slot: Option<TimeSlot>,
    picker_open: bool,
}

impl SlotSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time_slot(&self) -> Option<TimeSlot> {
        self.time_slot
    }

    pub fn is_date_picker_open(&self) -> bool {
        self.picker_open
    }

    /// Opening an already open picker is a no-op; there is only one.
    pub fn open_date_picker(&mut self) {
        if self.picker_open {
            debug!("Date picker already open");
        }
        self.picker_open = true;
    }

    /// Closes the picker without touching the selected date.
    pub fn dismiss_date_picker(&mut self) {
        self.picker_open = false;
    }

    /// Confirms the picker using the local calendar day as the earliest
    /// selectable date.
    pub fn confirm_date(&mut self, selected: Option<NaiveDate>) -> Result<(), AppointmentError> {
        self.confirm_date_at(selected, Local::now().date_naive())
    }

    /// Closes the picker and records `selected` if it is not before `today`.
    ///
    /// `None` means the picker was closed without a choice; the previous date
    /// is kept. A past date is rejected and the previous date is kept too.
    pub fn confirm_date_at(
        &mut self,
        selected: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<(), AppointmentError> {
        if !self.picker_open {
            return Err(AppointmentError::PickerNotOpen);
        }
        self.picker_open = false;

        let Some(date) = selected else {
            debug!("Date picker closed without a selection");
            return Ok(());
        };

        if date < today {
            return Err(AppointmentError::PastDate(date));
        }

        self.date = Some(date);
        Ok(())
    }

    /// `None` is the "Select Time Slot" placeholder.
    pub fn select_time_slot(&mut self, slot: Option<TimeSlot>) {
        self.time_slot = slot;
    }

    /// Selects by display label; an empty label picks the placeholder.
    pub fn select_time_slot_label(&mut self, label: &str) -> Result<(), AppointmentError> {
        if label.trim().is_empty() {
            self.time_slot = None;
            return Ok(());
        }

        self.time_slot = Some(label.parse()?);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn confirming_a_future_date_sets_and_closes() {
        let mut selector = SlotSelector::new();
        selector.open_date_picker();

        selector
            .confirm_date_at(Some(day(2025, 5, 20)), day(2025, 5, 1))
            .unwrap();

        assert_eq!(selector.date(), Some(day(2025, 5, 20)));
        assert!(!selector.is_date_picker_open());
    }

    #[test]
    fn today_is_selectable() {
        let mut selector = SlotSelector::new();
        let today = day(2025, 6, 1);
        selector.open_date_picker();

        selector.confirm_date_at(Some(today), today).unwrap();
        assert_eq!(selector.date(), Some(today));
    }

    #[test]
    fn past_date_is_rejected_and_previous_value_kept() {
        let mut selector = SlotSelector::new();
        let today = day(2025, 6, 10);

        selector.open_date_picker();
        selector.confirm_date_at(Some(day(2025, 6, 12)), today).unwrap();

        selector.open_date_picker();
        let result = selector.confirm_date_at(Some(today - Duration::days(1)), today);

        assert_eq!(result, Err(AppointmentError::PastDate(day(2025, 6, 9))));
        assert_eq!(selector.date(), Some(day(2025, 6, 12)));
        assert!(!selector.is_date_picker_open());
    }

    #[test]
    fn closing_without_selection_keeps_unset() {
        let mut selector = SlotSelector::new();
        selector.open_date_picker();

        selector.confirm_date_at(None, day(2025, 6, 1)).unwrap();

        assert_eq!(selector.date(), None);
        assert!(!selector.is_date_picker_open());
    }

    #[test]
    fn dismiss_leaves_date_untouched() {
        let mut selector = SlotSelector::new();
        selector.open_date_picker();
        selector.confirm_date_at(Some(day(2030, 1, 2)), day(2025, 1, 1)).unwrap();

        selector.open_date_picker();
        selector.dismiss_date_picker();

        assert_eq!(selector.date(), Some(day(2030, 1, 2)));
        assert!(!selector.is_date_picker_open());
    }

    #[test]
    fn confirm_requires_open_picker() {
        let mut selector = SlotSelector::new();
        assert_eq!(
            selector.confirm_date_at(Some(day(2030, 1, 1)), day(2025, 1, 1)),
            Err(AppointmentError::PickerNotOpen)
        );
        assert_eq!(selector.date(), None);
    }

    #[test]
    fn time_slot_by_label() {
        let mut selector = SlotSelector::new();

        selector.select_time_slot_label("3:00 PM").unwrap();
        assert_eq!(selector.time_slot(), Some(TimeSlot::ThreePm));

        assert!(selector.select_time_slot_label("3:30 PM").is_err());
        assert_eq!(selector.time_slot(), Some(TimeSlot::ThreePm));

        selector.select_time_slot_label("").unwrap();
        assert_eq!(selector.time_slot(), None);
    }

    #[test]
    fn reset_clears_everything() {
        let mut selector = SlotSelector::new();
        selector.open_date_picker();
        selector.confirm_date_at(Some(day(2030, 1, 1)), day(2025, 1, 1)).unwrap();
        selector.select_time_slot(Some(TimeSlot::NineAm));
        selector.open_date_picker();

        selector.reset();

        assert_eq!(selector.date(), None);
        assert_eq!(selector.time_slot(), None);
        assert!(!selector.is_date_picker_open());
    }
}
