//! The booking wizard: a finite-state controller sequencing ticket
//! selection, order creation, and payment.
//!
//! # Architecture
//!
//! ```text
//! SelectingTickets ──advance (selection non-empty)──► ReviewingOrder
//!        ▲                                                │
//!        └───────────────── back ◄───────────────────────┤
//!                                                         │ advance
//!                                                         ▼
//!                                              Order Submitter (once)
//!                                                         │
//!                          OrderRejected ◄── failure ─────┤
//!                          (stay in ReviewingOrder)       │ OrderAccepted
//!                                                         ▼
//!                                                  AwaitingPayment
//!                                                         │ pay
//!                                                         ▼
//!                                               Payment Initiator
//!                                                         │
//!                        PaymentDeclined ◄── failure ─────┤
//!                        (stay, user may resubmit)        │ settled
//!                                                         ▼
//!                                                     Completed
//! ```
//!
//! The wizard is the single place that decides state transitions versus
//! stay-and-display-error. Failure is a recoverable overlay on the step
//! that produced it, not a separate terminal state. Once an order exists
//! there is no way back: order creation is irrevocable in this flow.
//!
//! Duplicate submissions are prevented by an in-flight flag: while one
//! network call is outstanding, a second advance or pay event is suppressed.
//! The server has no idempotency key, so this at-most-one-submit guard is a
//! hard invariant, not a UX nicety.

pub mod actions;
pub mod environment;
pub mod reducer;
pub mod store;
pub mod types;

pub use actions::BookingAction;
pub use environment::BookingEnvironment;
pub use reducer::BookingWizard;
pub use store::{BookingStore, booking_store, start_booking};
pub use types::{BookingState, BookingStep};
