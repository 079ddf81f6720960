//! Integration test driving the wizard through the store's
//! request-response API, the way a UI layer would.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use chrono::{Duration as ChronoDuration, Utc};
use makankom_booking::mocks::{
    InMemoryCatalog, ScriptedOrderService, ScriptedPaymentGateway, StaticIdentity,
};
use makankom_booking::types::{
    CategoryId, Event, EventId, EventStatus, PaymentMethod, TicketType, TicketTypeId,
};
use makankom_booking::wizard::{BookingAction, BookingEnvironment, BookingStep, start_booking};
use makankom_testing::test_clock;
use std::sync::Arc;
use std::time::Duration;

fn festival() -> Event {
    let starts_at = Utc::now() + ChronoDuration::days(7);
    Event {
        id: EventId::new(7),
        title: "Salalah Festival".to_string(),
        slug: "salalah-festival".to_string(),
        status: EventStatus::Published,
        category_id: CategoryId::new(1),
        is_featured: true,
        starts_at,
        ends_at: starts_at + ChronoDuration::hours(5),
        venue_name: "Ittin Grounds".to_string(),
        venue_address: "Salalah".to_string(),
        ticket_types: vec![TicketType {
            id: TicketTypeId::new(1),
            name: "General".to_string(),
            price: "15.00".parse().unwrap(),
            quantity_available: 100,
            quantity_sold: 0,
            is_active: true,
        }],
    }
}

#[tokio::test]
async fn full_booking_flow_via_request_response() {
    let event = festival();
    let environment = BookingEnvironment::new(
        Arc::new(test_clock()),
        InMemoryCatalog::new().with_event(event.clone()).shared(),
        Arc::new(ScriptedOrderService::accepting(&event)),
        Arc::new(ScriptedPaymentGateway::approving()),
        Arc::new(StaticIdentity::customer("Flow Tester")),
    );

    let store = start_booking(event.id, environment).await.unwrap();

    store
        .send(BookingAction::SetQuantity {
            ticket_type_id: TicketTypeId::new(1),
            quantity: 3,
        })
        .await
        .unwrap();
    store.send(BookingAction::Advance).await.unwrap();

    // Submit the order and wait for the service outcome to come back
    let outcome = store
        .send_and_wait_for(
            BookingAction::Advance,
            |a| {
                matches!(
                    a,
                    BookingAction::OrderAccepted { .. } | BookingAction::OrderRejected { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await
        .unwrap();
    let order = match outcome {
        BookingAction::OrderAccepted { order } => order,
        other => panic!("expected OrderAccepted, got {other:?}"),
    };
    assert_eq!(order.total_amount, "45.00".parse().unwrap());

    // Waiting on the handle covers the whole effect chain, including the
    // feedback action's own reduction.
    let mut handle = store
        .send(BookingAction::Pay {
            method: PaymentMethod::Thawani,
        })
        .await
        .unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();

    let step = store.state(|s| s.step.clone()).await;
    assert!(matches!(step, BookingStep::Completed { .. }));

    store.shutdown(Duration::from_secs(5)).await.unwrap();
}
