//! End-to-end booking demo against the in-memory mock services.
//!
//! Runs the full flow: session check, catalog fetch, ticket selection,
//! order submission, payment, confirmation.

use anyhow::Context;
use chrono::{Duration as ChronoDuration, Utc};
use makankom_booking::Config;
use makankom_booking::mocks::{
    InMemoryCatalog, ScriptedOrderService, ScriptedPaymentGateway, StaticIdentity,
};
use makankom_booking::orders::{OrderRequest, OrderService};
use makankom_booking::types::{
    Category, CategoryId, Event, EventFilters, EventId, EventStatus, PaymentMethod, TicketType,
    TicketTypeId,
};
use makankom_booking::wizard::{BookingAction, BookingEnvironment, BookingStep, start_booking};
use makankom_core::environment::SystemClock;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn demo_event() -> Event {
    let starts_at = Utc::now() + ChronoDuration::days(14);
    Event {
        id: EventId::new(1),
        title: "Muscat Jazz Festival".to_string(),
        slug: "muscat-jazz-festival".to_string(),
        status: EventStatus::Published,
        category_id: CategoryId::new(2),
        is_featured: true,
        starts_at,
        ends_at: starts_at + ChronoDuration::hours(6),
        venue_name: "Qurum Amphitheatre".to_string(),
        venue_address: "Qurum, Muscat".to_string(),
        ticket_types: vec![
            TicketType {
                id: TicketTypeId::new(10),
                name: "General".to_string(),
                price: "10.00".parse().unwrap_or_default(),
                quantity_available: 500,
                quantity_sold: 120,
                is_active: true,
            },
            TicketType {
                id: TicketTypeId::new(11),
                name: "VIP".to_string(),
                price: "25.00".parse().unwrap_or_default(),
                quantity_available: 50,
                quantity_sold: 12,
                is_active: true,
            },
        ],
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!(api_base_url = %config.api_base_url, "Booking demo starting (mock services)");

    let event = demo_event();
    let orders = Arc::new(ScriptedOrderService::accepting(&event));
    let catalog = InMemoryCatalog::new()
        .with_event(event.clone())
        .with_category(Category {
            id: CategoryId::new(2),
            name: "Music".to_string(),
        })
        .shared();
    let environment = BookingEnvironment::new(
        Arc::new(SystemClock::new()),
        Arc::clone(&catalog),
        Arc::clone(&orders) as Arc<dyn OrderService>,
        Arc::new(ScriptedPaymentGateway::approving()),
        Arc::new(StaticIdentity::customer("Demo Customer")),
    );

    // Browse the catalog the way the home page would
    let categories = catalog.categories().await?;
    let featured = catalog
        .events(EventFilters {
            status: Some(EventStatus::Published),
            featured: Some(true),
            ..EventFilters::default()
        })
        .await?;
    tracing::info!(
        categories = categories.len(),
        featured = featured.len(),
        "Catalog loaded"
    );

    let store = start_booking(event.id, environment)
        .await
        .context("starting booking run")?;

    // Pick 2 general admission and 1 VIP
    for (ticket_type_id, quantity) in [(TicketTypeId::new(10), 2), (TicketTypeId::new(11), 1)] {
        store
            .send(BookingAction::SetQuantity {
                ticket_type_id,
                quantity,
            })
            .await?;
    }

    let (count, subtotal) = store
        .state(|s| (s.selection.ticket_count(), s.subtotal()))
        .await;
    tracing::info!(tickets = count, subtotal = ?subtotal.map(|m| m.to_string()), "Selection made");

    // Preview server-side totals before committing
    let summary = orders
        .order_summary(OrderRequest {
            event_id: event.id,
            lines: store.state(|s| s.selection.order_lines()).await,
        })
        .await
        .context("previewing order totals")?;
    tracing::info!(total = %summary.total_amount, "Order preview");

    // Advance to review, then submit the order
    store.send(BookingAction::Advance).await?;
    let mut handle = store.send(BookingAction::Advance).await?;
    handle.wait_with_timeout(Duration::from_secs(10)).await?;

    let order = store
        .state(|s| match &s.step {
            BookingStep::AwaitingPayment { order } => Some(order.clone()),
            _ => None,
        })
        .await
        .context("order was not created")?;
    tracing::info!(order_number = %order.order_number, total = %order.total_amount, "Order created");

    // Pay by card
    let mut handle = store
        .send(BookingAction::Pay {
            method: PaymentMethod::CreditCard,
        })
        .await?;
    handle.wait_with_timeout(Duration::from_secs(10)).await?;

    store
        .state(|s| match &s.step {
            BookingStep::Completed {
                order,
                payment,
                completed_at,
            } => {
                tracing::info!(
                    order_number = %order.order_number,
                    reference = ?payment.transaction_reference,
                    %completed_at,
                    "Booking confirmed"
                );
                Some(())
            },
            _ => None,
        })
        .await
        .context("booking did not complete")?;

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
