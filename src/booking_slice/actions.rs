//! Custom actions for bookings.
//!
//! These are the operations beyond create/update/delete. The server answers with the changed
//! [`Booking`](crate::model::Booking), which replaces the local copy by id.

use sync_framework::{Method, RecordAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    /// Refunds a paid booking (`POST /api/bookings/{id}/refund`).
    Refund,
}

impl RecordAction for BookingAction {
    fn method(&self) -> Method {
        match self {
            BookingAction::Refund => Method::POST,
        }
    }

    fn segment(&self) -> &'static str {
        match self {
            BookingAction::Refund => "refund",
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            BookingAction::Refund => "refund",
        }
    }
}
