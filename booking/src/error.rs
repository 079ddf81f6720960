//! Error taxonomy for the booking workflow.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the booking workflow
///
/// Every network-calling component reports failures upward as one of these
/// tagged outcomes; the wizard is the single point that decides whether a
/// state transition happens or the error is displayed in place.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BookingError {
    /// Client-local validation failure: empty selection, quantity beyond
    /// known availability. Recovered locally, never reaches the network.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The order service rejected creation: inventory conflict, malformed
    /// request, expired auth. The wizard stays in the review step.
    #[error("order creation failed: {0}")]
    OrderCreationFailed(String),

    /// The payment service or gateway declined, timed out, or errored.
    /// The wizard stays in the payment step; the user may resubmit.
    #[error("payment failed: {0}")]
    PaymentFailed(String),

    /// Event or ticket type vanished between load and submit. Terminal for
    /// the current wizard instance; the user is routed back to the catalog.
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport-level failure talking to the API
    #[error("api request failed: {0}")]
    Api(String),
}

impl BookingError {
    /// Whether the current wizard instance can continue after this error
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}
