//! Payment initiation against the payment service.
//!
//! All gateways are external black boxes behind one REST call; the client
//! sends an order, an amount, and a method tag, and gets back a status.
//! Polymorphism over payment method lives in [`crate::types::PaymentMethod`]
//! so the wizard stays method-agnostic.

use crate::error::BookingError;
use crate::types::{Money, OrderId, PaymentAttempt, PaymentMethod};
use std::future::Future;
use std::pin::Pin;

/// A payment request for a fixed amount against one order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Order being paid
    pub order_id: OrderId,
    /// Amount to charge, taken from the order's server-computed total
    pub amount: Money,
    /// Selected payment method
    pub method: PaymentMethod,
}

/// Payment gateway trait
///
/// One attempt is made per pay event; a failed attempt is surfaced to the
/// user, who may resubmit with the same or a different method. There is no
/// automatic retry.
pub trait PaymentGateway: Send + Sync {
    /// Process a payment
    ///
    /// The returned attempt's status may be `Failure`; that is a declined
    /// payment, not a transport error.
    ///
    /// # Errors
    ///
    /// - [`BookingError::PaymentFailed`]: gateway declined, timed out, or errored
    /// - [`BookingError::Api`]: transport failure
    fn process_payment(
        &self,
        request: PaymentRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PaymentAttempt, BookingError>> + Send>>;
}
