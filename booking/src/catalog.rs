//! Read-only access to the event catalog.

use crate::error::BookingError;
use crate::types::{Category, Event, EventFilters, EventId};
use std::future::Future;
use std::pin::Pin;

/// Catalog reader trait
///
/// Fetches event and ticket-type data for display and selection. Strictly
/// read-only; the catalog is refetched per session rather than cached.
pub trait CatalogReader: Send + Sync {
    /// List events matching the given filters
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Api`] on transport failure.
    fn events(
        &self,
        filters: EventFilters,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Event>, BookingError>> + Send>>;

    /// Fetch one event with its ticket types embedded
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] when the event does not exist, or
    /// [`BookingError::Api`] on transport failure.
    fn fetch_event(
        &self,
        event_id: EventId,
    ) -> Pin<Box<dyn Future<Output = Result<Event, BookingError>> + Send>>;

    /// Fetch one event by its public URL slug
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] when no event carries the slug, or
    /// [`BookingError::Api`] on transport failure.
    fn event_by_slug(
        &self,
        slug: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Event, BookingError>> + Send>>;

    /// List the event categories used for browsing
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Api`] on transport failure.
    fn categories(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Category>, BookingError>> + Send>>;
}
