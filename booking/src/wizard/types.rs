//! State types for the booking wizard.

use crate::error::BookingError;
use crate::selection::Selection;
use crate::types::{Event, Money, Order, PaymentAttempt};

/// The named steps of the booking wizard
///
/// `Completed` is terminal. Failure is not a step: a failed submission or
/// payment leaves the step unchanged and records the error on the state.
#[derive(Clone, Debug, PartialEq)]
pub enum BookingStep {
    /// Choosing ticket types and quantities
    SelectingTickets,
    /// Reviewing the selection before committing to an order
    ReviewingOrder,
    /// Order created; choosing a payment method and paying
    AwaitingPayment {
        /// The committed order, held read-only
        order: Order,
    },
    /// Payment settled; terminal
    Completed {
        /// The committed order
        order: Order,
        /// The settling payment attempt
        payment: PaymentAttempt,
        /// When the wizard reached confirmation
        completed_at: chrono::DateTime<chrono::Utc>,
    },
}

/// State for one booking wizard run
///
/// Each booking attempt owns its selection and order result exclusively;
/// nothing here is shared across wizard instances.
#[derive(Clone, Debug, PartialEq)]
pub struct BookingState {
    /// The event being booked, fetched before the wizard starts
    pub event: Event,
    /// The ticket selection
    pub selection: Selection,
    /// Current step
    pub step: BookingStep,
    /// Error to display, if the last action failed
    pub error: Option<BookingError>,
    /// Whether a network call is outstanding.
    ///
    /// While set, advance and pay events are suppressed so at most one
    /// order and one payment attempt can be created per user decision.
    pub request_in_flight: bool,
}

impl BookingState {
    /// Start a fresh wizard run for an event
    #[must_use]
    pub const fn new(event: Event) -> Self {
        Self {
            event,
            selection: Selection::new(),
            step: BookingStep::SelectingTickets,
            error: None,
            request_in_flight: false,
        }
    }

    /// Whether the wizard has reached its terminal step
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.step, BookingStep::Completed { .. })
    }

    /// Client-side subtotal for display on the selection step.
    ///
    /// Server-computed totals take over once an order exists.
    #[must_use]
    pub fn subtotal(&self) -> Option<Money> {
        self.selection.subtotal()
    }
}
