//! Order submission against the order service.

use crate::error::BookingError;
use crate::types::{EventId, Order, OrderSummary, TicketTypeId};
use std::future::Future;
use std::pin::Pin;

/// An order-creation request, built from the selection
///
/// Quantities have already been validated > 0 and within availability as
/// last known to the client; the server runs its own availability check at
/// submission time and may still reject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderRequest {
    /// Event the tickets belong to
    pub event_id: EventId,
    /// (ticket type, quantity) pairs
    pub lines: Vec<(TicketTypeId, u32)>,
}

/// Order service trait
///
/// Converts a selection into a committed order. Called exactly once per
/// wizard run; the wizard suppresses a second submission while one is
/// outstanding, which is the only duplicate guard in this design.
pub trait OrderService: Send + Sync {
    /// Create an order and obtain its server-assigned identifier and totals
    ///
    /// # Errors
    ///
    /// - [`BookingError::OrderCreationFailed`]: inventory changed server-side
    ///   or the request was rejected
    /// - [`BookingError::NotFound`]: event or ticket type vanished
    /// - [`BookingError::Api`]: transport failure
    fn create_order(
        &self,
        request: OrderRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Order, BookingError>> + Send>>;

    /// Compute totals for a prospective order without persisting it
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Api`] on transport failure.
    fn order_summary(
        &self,
        request: OrderRequest,
    ) -> Pin<Box<dyn Future<Output = Result<OrderSummary, BookingError>> + Send>>;
}
