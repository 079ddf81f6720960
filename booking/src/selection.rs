//! In-memory ticket selection, the only client-held mutable state before an
//! order exists.
//!
//! The selection maps ticket type → quantity and is mutated solely by direct
//! user action. Derived figures (ticket count, subtotal) are recomputed on
//! every read rather than cached, so a removal can never leave a stale total
//! behind. No method here performs I/O.

use crate::error::BookingError;
use crate::types::{Money, TicketType, TicketTypeId};
use std::collections::BTreeMap;

/// One selected ticket type with its quantity
///
/// Carries a denormalized copy of the ticket type so pricing and availability
/// are available without going back to the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionItem {
    /// The ticket type selected
    pub ticket_type: TicketType,
    /// Quantity selected, always > 0
    pub quantity: u32,
}

/// The selection store: ticket type → quantity
///
/// Invariants:
/// - every entry has quantity > 0 (a quantity reduced to 0 is removed)
/// - no entry's quantity exceeds the ticket type's known availability
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    items: BTreeMap<TicketTypeId, SelectionItem>,
}

impl Selection {
    /// Create an empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Set the quantity for a ticket type.
    ///
    /// - `quantity == 0` removes the entry entirely
    /// - a new ticket type inserts an entry; an existing one is replaced
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Validation`] when `quantity` exceeds the known
    /// availability; the selection is left unchanged.
    pub fn set_quantity(
        &mut self,
        ticket_type: &TicketType,
        quantity: u32,
    ) -> Result<(), BookingError> {
        if quantity == 0 {
            self.remove(ticket_type.id);
            return Ok(());
        }

        if !ticket_type.is_active {
            return Err(BookingError::Validation(format!(
                "ticket type \"{}\" is not on sale",
                ticket_type.name
            )));
        }

        if quantity > ticket_type.quantity_available {
            return Err(BookingError::Validation(format!(
                "only {} tickets of type \"{}\" are available",
                ticket_type.quantity_available, ticket_type.name
            )));
        }

        self.items.insert(
            ticket_type.id,
            SelectionItem {
                ticket_type: ticket_type.clone(),
                quantity,
            },
        );
        Ok(())
    }

    /// Remove a ticket type from the selection
    ///
    /// Removing an absent ticket type is a no-op.
    pub fn remove(&mut self, ticket_type_id: TicketTypeId) {
        self.items.remove(&ticket_type_id);
    }

    /// Drop all selected tickets
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Whether anything is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over selected items
    pub fn items(&self) -> impl Iterator<Item = &SelectionItem> {
        self.items.values()
    }

    /// The quantity selected for a ticket type, or 0 if not selected
    #[must_use]
    pub fn quantity(&self, ticket_type_id: TicketTypeId) -> u32 {
        self.items.get(&ticket_type_id).map_or(0, |i| i.quantity)
    }

    /// Total number of tickets across all entries, computed fresh
    #[must_use]
    pub fn ticket_count(&self) -> u32 {
        self.items.values().map(|i| i.quantity).sum()
    }

    /// Sum of price × quantity across all entries, computed fresh.
    ///
    /// Returns `None` on arithmetic overflow, which cannot happen for any
    /// realistic cart but is not silently clamped.
    #[must_use]
    pub fn subtotal(&self) -> Option<Money> {
        self.items.values().try_fold(Money::ZERO, |acc, item| {
            item.ticket_type
                .price
                .checked_multiply(item.quantity)
                .and_then(|line| acc.checked_add(line))
        })
    }

    /// The (ticket type, quantity) pairs an order request is built from
    #[must_use]
    pub fn order_lines(&self) -> Vec<(TicketTypeId, u32)> {
        self.items.values().map(|i| (i.ticket_type.id, i.quantity)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Money;

    fn ticket_type(id: u64, price: &str, available: u32) -> TicketType {
        TicketType {
            id: TicketTypeId::new(id),
            name: format!("type-{id}"),
            price: price.parse().unwrap(),
            quantity_available: available,
            quantity_sold: 0,
            is_active: true,
        }
    }

    #[test]
    fn inactive_ticket_type_is_rejected() {
        let mut inactive = ticket_type(1, "10.00", 5);
        inactive.is_active = false;

        let mut selection = Selection::new();
        let result = selection.set_quantity(&inactive, 1);
        assert!(matches!(result, Err(BookingError::Validation(_))));
        assert!(selection.is_empty());
    }

    #[test]
    fn subtotal_sums_price_times_quantity() {
        // {A: "10.00" x2} + {B: "25.00" x1} = 45.00
        let a = ticket_type(1, "10.00", 5);
        let b = ticket_type(2, "25.00", 1);

        let mut selection = Selection::new();
        selection.set_quantity(&a, 2).unwrap();
        selection.set_quantity(&b, 1).unwrap();

        assert_eq!(selection.subtotal().unwrap(), Money::from_minor_units(4500));
        assert_eq!(selection.ticket_count(), 3);
    }

    #[test]
    fn zero_quantity_removes_entry() {
        let a = ticket_type(1, "10.00", 5);
        let b = ticket_type(2, "25.00", 3);

        let mut selection = Selection::new();
        selection.set_quantity(&a, 2).unwrap();
        selection.set_quantity(&b, 1).unwrap();

        selection.set_quantity(&a, 0).unwrap();

        assert_eq!(selection.quantity(a.id), 0);
        assert_eq!(selection.ticket_count(), 1);
        assert_eq!(selection.subtotal().unwrap(), Money::from_minor_units(2500));
    }

    #[test]
    fn over_availability_is_rejected_unchanged() {
        let a = ticket_type(1, "10.00", 2);

        let mut selection = Selection::new();
        selection.set_quantity(&a, 2).unwrap();

        let result = selection.set_quantity(&a, 3);
        assert!(matches!(result, Err(BookingError::Validation(_))));
        assert_eq!(selection.quantity(a.id), 2);
    }

    #[test]
    fn replacing_quantity_overwrites() {
        let a = ticket_type(1, "10.00", 5);

        let mut selection = Selection::new();
        selection.set_quantity(&a, 2).unwrap();
        selection.set_quantity(&a, 4).unwrap();

        assert_eq!(selection.quantity(a.id), 4);
        assert_eq!(selection.ticket_count(), 4);
    }

    #[test]
    fn removing_absent_entry_is_noop() {
        let mut selection = Selection::new();
        selection.remove(TicketTypeId::new(42));
        assert!(selection.is_empty());
    }
}
