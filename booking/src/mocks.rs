//! Mock service implementations for development and testing.
//!
//! These stand in for the REST API: an in-memory catalog, scriptable order
//! and payment services, and a fixed identity. The demo binary runs the
//! whole flow against them; tests script failures to exercise the wizard's
//! error paths.

use crate::catalog::CatalogReader;
use crate::error::BookingError;
use crate::orders::{OrderRequest, OrderService};
use crate::payments::{PaymentGateway, PaymentRequest};
use crate::session::{IdentityProvider, Role, Session};
use crate::types::{
    Category, Event, EventFilters, EventId, Money, Order, OrderId, OrderLine, OrderNumber,
    OrderStatus, OrderSummary, PaymentAttempt, PaymentId, PaymentStatus,
};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory catalog seeded with events
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    events: HashMap<EventId, Event>,
    categories: Vec<Category>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event
    #[must_use]
    pub fn with_event(mut self, event: Event) -> Self {
        self.events.insert(event.id, event);
        self
    }

    /// Add a category
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(self) -> Arc<dyn CatalogReader> {
        Arc::new(self)
    }
}

fn matches_filters(event: &Event, filters: &EventFilters) -> bool {
    filters.category_id.is_none_or(|c| event.category_id == c)
        && filters.status.is_none_or(|s| event.status == s)
        && filters.featured.is_none_or(|f| event.is_featured == f)
        && filters
            .starts_after
            .is_none_or(|t| event.starts_at >= t)
        && filters
            .starts_before
            .is_none_or(|t| event.starts_at < t)
        && filters.query.as_ref().is_none_or(|q| {
            let q = q.to_lowercase();
            event.title.to_lowercase().contains(&q)
                || event.venue_name.to_lowercase().contains(&q)
        })
}

impl CatalogReader for InMemoryCatalog {
    fn events(
        &self,
        filters: EventFilters,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Event>, BookingError>> + Send>> {
        let mut events: Vec<Event> = self
            .events
            .values()
            .filter(|e| matches_filters(e, &filters))
            .cloned()
            .collect();
        events.sort_by_key(|e| e.starts_at);
        Box::pin(async move { Ok(events) })
    }

    fn fetch_event(
        &self,
        event_id: EventId,
    ) -> Pin<Box<dyn Future<Output = Result<Event, BookingError>> + Send>> {
        let result = self
            .events
            .get(&event_id)
            .cloned()
            .ok_or_else(|| BookingError::NotFound(format!("event {event_id} does not exist")));
        Box::pin(async move { result })
    }

    fn event_by_slug(
        &self,
        slug: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Event, BookingError>> + Send>> {
        let result = self
            .events
            .values()
            .find(|e| e.slug == slug)
            .cloned()
            .ok_or_else(|| BookingError::NotFound(format!("no event with slug \"{slug}\"")));
        Box::pin(async move { result })
    }

    fn categories(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Category>, BookingError>> + Send>> {
        let categories = self.categories.clone();
        Box::pin(async move { Ok(categories) })
    }
}

/// Scriptable order service
///
/// Pops one scripted outcome per `create_order` call. When the script runs
/// dry it accepts the order, computing totals from the request against a
/// price list. An optional artificial delay keeps the call outstanding long
/// enough for suppression tests to race against it.
pub struct ScriptedOrderService {
    outcomes: Mutex<Vec<Result<Order, BookingError>>>,
    prices: HashMap<crate::types::TicketTypeId, Money>,
    calls: AtomicUsize,
    delay: Option<Duration>,
    next_order_id: AtomicUsize,
}

impl ScriptedOrderService {
    /// Create a service that accepts every order, pricing lines from the event
    #[must_use]
    pub fn accepting(event: &Event) -> Self {
        let prices = event
            .ticket_types
            .iter()
            .map(|tt| (tt.id, tt.price))
            .collect();
        Self {
            outcomes: Mutex::new(Vec::new()),
            prices,
            calls: AtomicUsize::new(0),
            delay: None,
            next_order_id: AtomicUsize::new(1),
        }
    }

    /// Queue an outcome for the next `create_order` call
    ///
    /// Outcomes are consumed first-queued first.
    #[must_use]
    pub fn with_outcome(self, outcome: Result<Order, BookingError>) -> Self {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push(outcome);
        }
        self
    }

    /// Hold each call open for `delay` before responding
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `create_order` calls made so far
    #[must_use]
    pub fn order_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn totals(&self, request: &OrderRequest) -> (Vec<OrderLine>, Money) {
        let mut lines = Vec::new();
        let mut subtotal = Money::ZERO;
        for &(ticket_type_id, quantity) in &request.lines {
            let unit_price = self.prices.get(&ticket_type_id).copied().unwrap_or(Money::ZERO);
            if let Some(line_total) = unit_price.checked_multiply(quantity) {
                subtotal = subtotal.checked_add(line_total).unwrap_or(subtotal);
            }
            lines.push(OrderLine {
                ticket_type_id,
                quantity,
                unit_price,
            });
        }
        (lines, subtotal)
    }

    fn accept(&self, request: &OrderRequest) -> Order {
        let (lines, subtotal) = self.totals(request);
        let id = self.next_order_id.fetch_add(1, Ordering::SeqCst);
        Order {
            id: OrderId::new(id as u64),
            order_number: OrderNumber::new(format!("ORD-{id:06}")),
            status: OrderStatus::Pending,
            lines,
            subtotal,
            tax_amount: Money::ZERO,
            discount_amount: Money::ZERO,
            total_amount: subtotal,
        }
    }
}

impl OrderService for ScriptedOrderService {
    fn create_order(
        &self,
        request: OrderRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Order, BookingError>> + Send>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let scripted = self.outcomes.lock().ok().and_then(|mut outcomes| {
            if outcomes.is_empty() {
                None
            } else {
                Some(outcomes.remove(0))
            }
        });
        let result = scripted.unwrap_or_else(|| Ok(self.accept(&request)));
        let delay = self.delay;

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        })
    }

    fn order_summary(
        &self,
        request: OrderRequest,
    ) -> Pin<Box<dyn Future<Output = Result<OrderSummary, BookingError>> + Send>> {
        let (_, subtotal) = self.totals(&request);
        Box::pin(async move {
            Ok(OrderSummary {
                subtotal,
                tax_amount: Money::ZERO,
                discount_amount: Money::ZERO,
                total_amount: subtotal,
            })
        })
    }
}

/// Scriptable payment gateway
///
/// Pops one scripted status per `process_payment` call and builds the
/// attempt from the request. When the script runs dry every payment
/// succeeds, the way the development gateway does.
pub struct ScriptedPaymentGateway {
    statuses: Mutex<Vec<Result<PaymentStatus, BookingError>>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
    next_payment_id: AtomicUsize,
}

impl ScriptedPaymentGateway {
    /// Create a gateway that approves every payment
    #[must_use]
    pub fn approving() -> Self {
        Self {
            statuses: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: None,
            next_payment_id: AtomicUsize::new(1),
        }
    }

    /// Queue a status (or error) for the next `process_payment` call
    #[must_use]
    pub fn with_status(self, status: Result<PaymentStatus, BookingError>) -> Self {
        if let Ok(mut statuses) = self.statuses.lock() {
            statuses.push(status);
        }
        self
    }

    /// Hold each call open for `delay` before responding
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `process_payment` calls made so far
    #[must_use]
    pub fn payment_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PaymentGateway for ScriptedPaymentGateway {
    fn process_payment(
        &self,
        request: PaymentRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PaymentAttempt, BookingError>> + Send>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let scripted = self.statuses.lock().ok().and_then(|mut statuses| {
            if statuses.is_empty() {
                None
            } else {
                Some(statuses.remove(0))
            }
        });
        let status = scripted.unwrap_or(Ok(PaymentStatus::Success));
        let delay = self.delay;
        let payment_id = PaymentId::new(self.next_payment_id.fetch_add(1, Ordering::SeqCst) as u64);

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            let status = status?;
            let transaction_reference = status
                .is_settled()
                .then(|| format!("mock_txn_{}", uuid::Uuid::new_v4()));

            tracing::info!(
                order_id = %request.order_id,
                amount = %request.amount,
                method = %request.method,
                ?status,
                "Mock payment processed"
            );

            Ok(PaymentAttempt {
                id: payment_id,
                method: request.method,
                order_id: request.order_id,
                amount: request.amount,
                status,
                transaction_reference,
            })
        })
    }
}

/// Identity provider returning one fixed session
#[derive(Clone, Debug)]
pub struct StaticIdentity {
    session: Result<Session, BookingError>,
}

impl StaticIdentity {
    /// A signed-in customer
    #[must_use]
    pub fn customer(display_name: &str) -> Self {
        Self {
            session: Ok(Session {
                role: Role::Customer,
                token: format!("mock_token_{}", uuid::Uuid::new_v4()),
                display_name: display_name.to_string(),
            }),
        }
    }

    /// A signed-in account with an arbitrary role
    #[must_use]
    pub fn with_role(role: Role, display_name: &str) -> Self {
        Self {
            session: Ok(Session {
                role,
                token: format!("mock_token_{}", uuid::Uuid::new_v4()),
                display_name: display_name.to_string(),
            }),
        }
    }

    /// No session at all; callers are expected to redirect to sign-in
    #[must_use]
    pub fn signed_out() -> Self {
        Self {
            session: Err(BookingError::NotFound("no active session".to_string())),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn whoami(&self) -> Pin<Box<dyn Future<Output = Result<Session, BookingError>> + Send>> {
        let session = self.session.clone();
        Box::pin(async move { session })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{CategoryId, EventStatus, TicketType, TicketTypeId};
    use chrono::{Duration as ChronoDuration, Utc};

    fn event(id: u64, slug: &str, category: u64, featured: bool) -> Event {
        let starts_at = Utc::now() + ChronoDuration::days(i64::from(id as u32));
        Event {
            id: EventId::new(id),
            title: format!("Event {id}"),
            slug: slug.to_string(),
            status: EventStatus::Published,
            category_id: CategoryId::new(category),
            is_featured: featured,
            starts_at,
            ends_at: starts_at + ChronoDuration::hours(2),
            venue_name: "Venue".to_string(),
            venue_address: "Address".to_string(),
            ticket_types: vec![TicketType {
                id: TicketTypeId::new(id * 10),
                name: "General".to_string(),
                price: "5.00".parse().unwrap(),
                quantity_available: 10,
                quantity_sold: 0,
                is_active: true,
            }],
        }
    }

    #[tokio::test]
    async fn catalog_filters_by_category_and_featured() {
        let catalog = InMemoryCatalog::new()
            .with_event(event(1, "one", 1, true))
            .with_event(event(2, "two", 1, false))
            .with_event(event(3, "three", 2, true));

        let filtered = catalog
            .events(EventFilters {
                category_id: Some(CategoryId::new(1)),
                featured: Some(true),
                ..EventFilters::default()
            })
            .await
            .unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].slug, "one");
    }

    #[tokio::test]
    async fn catalog_resolves_events_by_slug() {
        let catalog = InMemoryCatalog::new().with_event(event(1, "muscat-expo", 1, false));

        let found = catalog.event_by_slug("muscat-expo").await.unwrap();
        assert_eq!(found.id, EventId::new(1));

        let missing = catalog.event_by_slug("nope").await;
        assert!(matches!(missing, Err(BookingError::NotFound(_))));
    }

    #[tokio::test]
    async fn scripted_gateway_consumes_outcomes_in_order() {
        let gateway = ScriptedPaymentGateway::approving()
            .with_status(Ok(PaymentStatus::Failure))
            .with_status(Ok(PaymentStatus::Pending));
        let request = PaymentRequest {
            order_id: OrderId::new(1),
            amount: "20.00".parse().unwrap(),
            method: crate::types::PaymentMethod::BankTransfer,
        };

        let first = gateway.process_payment(request.clone()).await.unwrap();
        assert_eq!(first.status, PaymentStatus::Failure);
        assert!(first.transaction_reference.is_none());

        let second = gateway.process_payment(request.clone()).await.unwrap();
        assert_eq!(second.status, PaymentStatus::Pending);

        // Script exhausted: defaults to success
        let third = gateway.process_payment(request).await.unwrap();
        assert_eq!(third.status, PaymentStatus::Success);
        assert_eq!(gateway.payment_calls(), 3);
    }
}
