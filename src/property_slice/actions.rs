//! Custom actions for properties.

use sync_framework::{Method, RecordAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyAction {
    /// Marks a listing as verified (`PATCH /api/properties/{id}/verify`).
    Verify,
}

impl RecordAction for PropertyAction {
    fn method(&self) -> Method {
        match self {
            PropertyAction::Verify => Method::PATCH,
        }
    }

    fn segment(&self) -> &'static str {
        match self {
            PropertyAction::Verify => "verify",
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            PropertyAction::Verify => "verify",
        }
    }
}
