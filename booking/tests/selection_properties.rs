//! Property-based tests for the selection store invariants.

#![allow(clippy::unwrap_used)]

use makankom_booking::selection::Selection;
use makankom_booking::types::{Money, TicketType, TicketTypeId};
use makankom_testing::properties::{minor_units, quantity};
use proptest::collection::vec;
use proptest::prelude::*;

fn arb_ticket_type() -> impl Strategy<Value = TicketType> {
    (1u64..=8, minor_units(), 0u32..=50).prop_map(|(id, price, available)| TicketType {
        id: TicketTypeId::new(id),
        name: format!("type-{id}"),
        price: Money::from_minor_units(price),
        quantity_available: available,
        quantity_sold: 0,
        is_active: true,
    })
}

fn arb_calls() -> impl Strategy<Value = Vec<(TicketType, u32)>> {
    vec((arb_ticket_type(), quantity()), 0..40)
}

proptest! {
    /// No sequence of set_quantity calls ever leaves an entry with
    /// quantity 0; a zero write removes the entry instead.
    #[test]
    fn no_entry_ever_has_zero_quantity(calls in arb_calls()) {
        let mut selection = Selection::new();
        for (ticket_type, qty) in calls {
            let _ = selection.set_quantity(&ticket_type, qty);
            prop_assert!(selection.items().all(|item| item.quantity > 0));
        }
    }

    /// Writing a quantity above availability leaves the store unchanged.
    #[test]
    fn over_availability_rejection_is_a_noop(
        ticket_type in arb_ticket_type(),
        initial in 0u32..=50,
        excess in 1u32..=10,
    ) {
        let mut selection = Selection::new();
        let initial = initial.min(ticket_type.quantity_available);
        let _ = selection.set_quantity(&ticket_type, initial);

        let before = selection.clone();
        let result = selection.set_quantity(
            &ticket_type,
            ticket_type.quantity_available + excess,
        );

        prop_assert!(result.is_err());
        prop_assert_eq!(selection, before);
    }

    /// The subtotal always equals the sum of price x quantity over the
    /// current entries, recomputed fresh after every call.
    #[test]
    fn subtotal_matches_sum_of_lines(calls in arb_calls()) {
        let mut selection = Selection::new();
        for (ticket_type, qty) in calls {
            let _ = selection.set_quantity(&ticket_type, qty);

            let expected: u64 = selection
                .items()
                .map(|item| {
                    item.ticket_type.price.minor_units() * u64::from(item.quantity)
                })
                .sum();
            prop_assert_eq!(
                selection.subtotal().unwrap(),
                Money::from_minor_units(expected)
            );

            let expected_count: u32 = selection.items().map(|i| i.quantity).sum();
            prop_assert_eq!(selection.ticket_count(), expected_count);
        }
    }
}
