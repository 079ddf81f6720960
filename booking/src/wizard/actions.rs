//! Actions driving the booking wizard.

use crate::error::BookingError;
use crate::types::{Order, PaymentAttempt, PaymentMethod, TicketTypeId};
use serde::{Deserialize, Serialize};

/// Actions processed by the booking wizard reducer
///
/// User events come from UI callbacks; service outcomes are fed back by the
/// effects those events start. The wizard is never driven by timers or
/// polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BookingAction {
    /// Set the quantity for a ticket type (0 removes it)
    SetQuantity {
        /// Ticket type to change
        ticket_type_id: TicketTypeId,
        /// New quantity
        quantity: u32,
    },

    /// Remove a ticket type from the selection
    RemoveSelection {
        /// Ticket type to remove
        ticket_type_id: TicketTypeId,
    },

    /// Move forward one step.
    ///
    /// From the review step this submits the order, exactly once.
    Advance,

    /// Move back one step.
    ///
    /// Disallowed once an order exists; order creation is irrevocable.
    Back,

    /// The order service accepted the submission
    OrderAccepted {
        /// The committed order with server-computed totals
        order: Order,
    },

    /// The order service rejected the submission
    OrderRejected {
        /// Why the order was not created
        error: BookingError,
    },

    /// Pay the committed order with the chosen method
    Pay {
        /// Selected payment method
        method: PaymentMethod,
    },

    /// The payment settled (success, or pending for bank transfers)
    PaymentSettled {
        /// The settling attempt
        attempt: PaymentAttempt,
    },

    /// The payment was declined or errored
    PaymentDeclined {
        /// Human-readable reason to display
        reason: String,
    },
}
