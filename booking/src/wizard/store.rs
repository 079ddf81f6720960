//! Store wiring for the booking wizard.

use crate::error::BookingError;
use crate::types::{Event, EventId};
use crate::wizard::{BookingAction, BookingEnvironment, BookingState, BookingWizard};
use makankom_runtime::Store;

/// The store type driving one booking wizard run
pub type BookingStore = Store<BookingState, BookingAction, BookingEnvironment, BookingWizard>;

/// Create a store for an already-fetched event
#[must_use]
pub fn booking_store(event: Event, environment: BookingEnvironment) -> BookingStore {
    Store::new(BookingState::new(event), BookingWizard::new(), environment)
}

/// Gate entry and start a booking run for an event.
///
/// Resolves the current session, requires the customer role, fetches the
/// event from the catalog, and returns a store positioned at the ticket
/// selection step.
///
/// # Errors
///
/// - [`BookingError::NotFound`]: no session, or the event does not exist —
///   the caller redirects to sign-in or back to the catalog respectively
/// - [`BookingError::Validation`]: signed in with a non-customer role
/// - [`BookingError::Api`]: transport failure
pub async fn start_booking(
    event_id: EventId,
    environment: BookingEnvironment,
) -> Result<BookingStore, BookingError> {
    let session = environment.identity().whoami().await?;
    session.authorize(crate::session::Role::Customer)?;

    let event = environment.catalog().fetch_event(event_id).await?;
    tracing::info!(event_id = %event.id, title = %event.title, "Starting booking run");

    Ok(booking_store(event, environment))
}
