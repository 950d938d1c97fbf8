// libs/appointment-cell/src/services/rating.rs
use crate::models::{AppointmentError, MAX_RATING, MIN_RATING};

/// Five-unit satisfaction rating. 0 means not yet rated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingCapture {
    rating: u8,
}

impl RatingCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u8 {
        self.rating
    }

    pub fn is_rated(&self) -> bool {
        self.rating > 0
    }

    pub fn on_change(&mut self, rating: i64) -> Result<u8, AppointmentError> {
        if rating < i64::from(MIN_RATING) || rating > i64::from(MAX_RATING) {
            return Err(AppointmentError::InvalidRating(rating.to_string()));
        }

        self.rating = rating as u8;
        Ok(self.rating)
    }

    /// Rounds to the nearest whole unit before applying.
    pub fn on_change_fractional(&mut self, rating: f64) -> Result<u8, AppointmentError> {
        if !rating.is_finite() {
            return Err(AppointmentError::InvalidRating(rating.to_string()));
        }

        let rounded = rating.round();
        if rounded < f64::from(MIN_RATING) || rounded > f64::from(MAX_RATING) {
            return Err(AppointmentError::InvalidRating(rating.to_string()));
        }

        self.on_change(rounded as i64)
    }

    pub fn reset(&mut self) {
        self.rating = 0;
    }
}
