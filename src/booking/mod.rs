//! Counselor booking selection.
//!
//! [`BookingSelector`] tracks the counselor, time slot and session medium a
//! visitor has picked. Selecting a different counselor clears the time slot,
//! since slots belong to a counselor's availability, and falls back to that
//! counselor's first medium when the current one is not offered.

use crate::catalog::{self, Counselor, SessionMedium};
use crate::types::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Counselor {0} not found")]
    UnknownCounselor(String),
    #[error("Select a counselor first")]
    NoCounselorSelected,
    #[error("{counselor} has no availability at {slot}")]
    UnavailableSlot { counselor: String, slot: String },
    #[error("{counselor} does not offer {medium} sessions")]
    UnsupportedMedium {
        counselor: String,
        medium: SessionMedium,
    },
    #[error("Select a counselor and a time before booking")]
    Incomplete,
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::UnknownCounselor(_) => AppError::NotFound(err.to_string()),
            _ => AppError::InvalidInput(err.to_string()),
        }
    }
}

pub type BookingResult<T> = std::result::Result<T, BookingError>;

/// Selections as submitted over HTTP. Applied counselor first, then medium,
/// then time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BookingRequest {
    pub counselor_id: Option<String>,
    pub time: Option<String>,
    pub medium: Option<SessionMedium>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookingSummary {
    pub counselor: Option<Counselor>,
    /// Price in whole dollars, when a counselor is selected.
    pub price: Option<u32>,
    pub time: Option<String>,
    pub medium: SessionMedium,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookingConfirmation {
    pub counselor_id: String,
    pub counselor_name: String,
    pub time: String,
    pub medium: SessionMedium,
    pub price: u32,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct BookingSelector<'a> {
    catalog: &'a [Counselor],
    counselor: Option<&'a Counselor>,
    time: Option<String>,
    medium: SessionMedium,
}

impl Default for BookingSelector<'static> {
    fn default() -> Self {
        Self::new(catalog::counselors())
    }
}

impl<'a> BookingSelector<'a> {
    pub fn new(catalog: &'a [Counselor]) -> Self {
        Self {
            catalog,
            counselor: None,
            time: None,
            medium: SessionMedium::default(),
        }
    }

    /// Replay a submitted request onto a fresh selector.
    pub fn from_request(catalog: &'a [Counselor], request: &BookingRequest) -> BookingResult<Self> {
        let mut selector = Self::new(catalog);
        if let Some(id) = &request.counselor_id {
            selector.select_counselor(id)?;
        }
        if let Some(medium) = request.medium {
            selector.select_medium(medium)?;
        }
        if let Some(slot) = &request.time {
            selector.select_time(slot)?;
        }
        Ok(selector)
    }

    pub fn counselor(&self) -> Option<&'a Counselor> {
        self.counselor
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn medium(&self) -> SessionMedium {
        self.medium
    }

    pub fn select_counselor(&mut self, id: &str) -> BookingResult<&'a Counselor> {
        let counselor = self
            .catalog
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| BookingError::UnknownCounselor(id.to_string()))?;

        let changed = self.counselor.is_none_or(|current| current.id != counselor.id);
        if changed {
            self.time = None;
        }
        if !counselor.offers(self.medium) {
            if let Some(first) = counselor.session_mediums.first() {
                self.medium = *first;
            }
        }

        self.counselor = Some(counselor);
        Ok(counselor)
    }

    pub fn select_time(&mut self, slot: &str) -> BookingResult<()> {
        let counselor = self.counselor.ok_or(BookingError::NoCounselorSelected)?;
        if !counselor.has_slot(slot) {
            return Err(BookingError::UnavailableSlot {
                counselor: counselor.name.clone(),
                slot: slot.to_string(),
            });
        }
        self.time = Some(slot.to_string());
        Ok(())
    }

    pub fn select_medium(&mut self, medium: SessionMedium) -> BookingResult<()> {
        if let Some(counselor) = self.counselor {
            if !counselor.offers(medium) {
                return Err(BookingError::UnsupportedMedium {
                    counselor: counselor.name.clone(),
                    medium,
                });
            }
        }
        self.medium = medium;
        Ok(())
    }

    pub fn is_booking_enabled(&self) -> bool {
        self.counselor.is_some() && self.time.is_some()
    }

    pub fn summary(&self) -> BookingSummary {
        BookingSummary {
            counselor: self.counselor.cloned(),
            price: self.counselor.map(|c| c.price),
            time: self.time.clone(),
            medium: self.medium,
            enabled: self.is_booking_enabled(),
        }
    }

    pub fn confirm(&self) -> BookingResult<BookingConfirmation> {
        match (self.counselor, &self.time) {
            (Some(counselor), Some(time)) => Ok(BookingConfirmation {
                counselor_id: counselor.id.clone(),
                counselor_name: counselor.name.clone(),
                time: time.clone(),
                medium: self.medium,
                price: counselor.price,
                message: format!(
                    "Booking confirmed with {} on {} via {}",
                    counselor.name, time, self.medium
                ),
            }),
            _ => Err(BookingError::Incomplete),
        }
    }
}
