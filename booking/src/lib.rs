//! # Makankom Booking
//!
//! Client-side booking workflow for the Makankom event-ticketing
//! marketplace: ticket selection → order creation → payment → confirmation,
//! modeled as an explicit state machine decoupled from any rendering layer.
//!
//! All real invariants (inventory counts, payment settlement, ticket
//! issuance) are enforced server-side behind a REST API; this crate owns the
//! client's share of the workflow and nothing more.
//!
//! # Components
//!
//! - [`selection`]: the in-memory ticket selection, the only client-held
//!   mutable state before an order exists
//! - [`wizard`]: the finite-state controller sequencing the flow
//! - [`catalog`], [`orders`], [`payments`], [`session`]: trait seams for the
//!   REST collaborators
//! - [`client`]: the reqwest implementation of those seams
//! - [`mocks`]: in-memory implementations for development and tests
//!
//! # Example
//!
//! ```ignore
//! use makankom_booking::wizard::{BookingAction, start_booking};
//! use makankom_booking::types::{EventId, PaymentMethod};
//!
//! let store = start_booking(EventId::new(1), environment).await?;
//!
//! store.send(BookingAction::SetQuantity {
//!     ticket_type_id,
//!     quantity: 2,
//! }).await?;
//! store.send(BookingAction::Advance).await?; // review
//! store.send(BookingAction::Advance).await?; // submit order
//! store.send(BookingAction::Pay { method: PaymentMethod::Thawani }).await?;
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod mocks;
pub mod orders;
pub mod payments;
pub mod selection;
pub mod session;
pub mod types;
pub mod wizard;

pub use config::Config;
pub use error::BookingError;
pub use selection::{Selection, SelectionItem};
pub use wizard::{BookingAction, BookingEnvironment, BookingState, BookingStep, BookingWizard};
