//! Domain types for the Makankom booking workflow.
//!
//! This module contains the value objects and entities shared by the selection
//! store, the booking wizard, and the service clients. Identifiers are
//! server-assigned numbers; money is carried in minor units and rendered as
//! the decimal strings the API speaks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(u64);

impl EventId {
    /// Create an `EventId` from a server-assigned number
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner number
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a ticket type
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TicketTypeId(u64);

impl TicketTypeId {
    /// Create a `TicketTypeId` from a server-assigned number
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner number
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TicketTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an event category
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(u64);

impl CategoryId {
    /// Create a `CategoryId` from a server-assigned number
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an order
///
/// Assigned by the server on order creation; the client never fabricates one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(u64);

impl OrderId {
    /// Create an `OrderId` from a server-assigned number
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner number
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a payment record
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentId(u64);

impl PaymentId {
    /// Create a `PaymentId` from a server-assigned number
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable order number assigned by the server, used for display
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Wrap a server-assigned order number
    #[must_use]
    pub const fn new(number: String) -> Self {
        Self(number)
    }

    /// The number as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Money
// ============================================================================

/// Error parsing a decimal money string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid money amount: {input}")]
pub struct MoneyParseError {
    /// The string that failed to parse
    pub input: String,
}

/// Monetary amount in minor units (e.g. 1000 = "10.00")
///
/// The API exchanges prices as decimal strings to avoid floating point
/// drift; this type parses them into integer minor units so arithmetic is
/// exact, and renders them back with two decimal places.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Create from minor units (cents/fils)
    #[must_use]
    pub const fn from_minor_units(units: u64) -> Self {
        Self(units)
    }

    /// Get the amount in minor units
    #[must_use]
    pub const fn minor_units(&self) -> u64 {
        self.0
    }

    /// Checked addition
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(units) => Some(Self(units)),
            None => None,
        }
    }

    /// Checked multiplication by a quantity
    #[must_use]
    pub const fn checked_multiply(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as u64) {
            Some(units) => Some(Self(units)),
            None => None,
        }
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    /// Parse a decimal string such as `"10.00"`, `"25.5"`, or `"45"`.
    ///
    /// At most two fractional digits are accepted; anything else (negative
    /// amounts, extra dots, non-digits) is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MoneyParseError {
            input: s.to_string(),
        };

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) if !f.is_empty() => (w, f),
            Some(_) => return Err(err()),
            None => (s, ""),
        };

        if whole.is_empty() || frac.len() > 2 {
            return Err(err());
        }

        let whole: u64 = whole.parse().map_err(|_| err())?;

        let frac_units: u64 = if frac.is_empty() {
            0
        } else {
            let digits: u64 = frac.parse().map_err(|_| err())?;
            if frac.len() == 1 { digits * 10 } else { digits }
        };

        whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(frac_units))
            .map(Self)
            .ok_or_else(err)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Catalog entities
// ============================================================================

/// A priced category of admission belonging to one event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketType {
    /// Ticket type identifier
    pub id: TicketTypeId,
    /// Display name (e.g. "General", "VIP")
    pub name: String,
    /// Unit price
    pub price: Money,
    /// Quantity still available for sale, as last known to the client.
    /// The server is the final authority at submission time.
    pub quantity_available: u32,
    /// Quantity already sold
    pub quantity_sold: u32,
    /// Whether the ticket type is currently on sale
    pub is_active: bool,
}

/// Lifecycle status of an event listing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Being drafted by the organizer
    Draft,
    /// Submitted, awaiting marketplace approval
    Pending,
    /// Live and bookable
    Published,
    /// Cancelled by the organizer or the marketplace
    Cancelled,
    /// The event date has passed
    Completed,
}

/// An event in the catalog, with its ticket types embedded
///
/// Immutable from the client's perspective once fetched; refetched per
/// session rather than cached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier
    pub id: EventId,
    /// Event title
    pub title: String,
    /// URL slug used for public event pages
    pub slug: String,
    /// Listing status
    pub status: EventStatus,
    /// Category the event is listed under
    pub category_id: CategoryId,
    /// Whether the event is featured on the home page
    pub is_featured: bool,
    /// Start time
    pub starts_at: chrono::DateTime<chrono::Utc>,
    /// End time
    pub ends_at: chrono::DateTime<chrono::Utc>,
    /// Venue name
    pub venue_name: String,
    /// Venue address
    pub venue_address: String,
    /// Ticket types on sale for this event
    pub ticket_types: Vec<TicketType>,
}

impl Event {
    /// Look up a ticket type by identifier
    #[must_use]
    pub fn ticket_type(&self, id: TicketTypeId) -> Option<&TicketType> {
        self.ticket_types.iter().find(|tt| tt.id == id)
    }
}

/// An event category used for catalog browsing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier
    pub id: CategoryId,
    /// Display name
    pub name: String,
}

/// Query surface for browsing the catalog
///
/// All filters are optional and combine conjunctively. Sent as query
/// parameters on the event listing endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EventFilters {
    /// Restrict to one category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// Restrict to one listing status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    /// Events starting on or after this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_after: Option<chrono::DateTime<chrono::Utc>>,
    /// Events starting before this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_before: Option<chrono::DateTime<chrono::Utc>>,
    /// Free-text search over title and venue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Only featured events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    /// Page number, 1-based
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

// ============================================================================
// Orders
// ============================================================================

/// A single line of an order: one ticket type at a quantity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Ticket type being purchased
    pub ticket_type_id: TicketTypeId,
    /// Quantity purchased (always > 0)
    pub quantity: u32,
    /// Unit price at purchase time
    pub unit_price: Money,
}

/// Settlement status of an order, as the server reports it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created, payment not yet confirmed
    Pending,
    /// Paid in full
    Paid,
    /// Cancelled or expired server-side
    Cancelled,
}

/// A committed order, as returned by the order service
///
/// The client holds this as an opaque read-only result after creation and
/// never mutates it locally. All totals are server-computed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Server-assigned identifier
    pub id: OrderId,
    /// Human-readable order number for display
    pub order_number: OrderNumber,
    /// Settlement status at creation time
    pub status: OrderStatus,
    /// Line items
    pub lines: Vec<OrderLine>,
    /// Sum of line totals
    pub subtotal: Money,
    /// Tax applied
    pub tax_amount: Money,
    /// Discount applied
    pub discount_amount: Money,
    /// Amount to charge
    pub total_amount: Money,
}

/// Server-computed totals for a prospective order, without persisting it
///
/// Used to preview amounts on the review step before committing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Sum of line totals
    pub subtotal: Money,
    /// Tax that would be applied
    pub tax_amount: Money,
    /// Discount that would be applied
    pub discount_amount: Money,
    /// Amount that would be charged
    pub total_amount: Money,
}

// ============================================================================
// Payments
// ============================================================================

/// Payment method, a closed set mirroring what the payment service accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Thawani hosted checkout
    Thawani,
    /// AmwalPay gateway
    #[serde(rename = "amwalpay")]
    AmwalPay,
    /// Direct card entry
    CreditCard,
    /// Offline bank transfer, settles later
    BankTransfer,
}

impl PaymentMethod {
    /// The wire tag the payment service expects
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Thawani => "thawani",
            Self::AmwalPay => "amwalpay",
            Self::CreditCard => "credit_card",
            Self::BankTransfer => "bank_transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome status of a payment attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Charged and confirmed
    Success,
    /// Accepted but not yet confirmed (bank transfers settle offline)
    Pending,
    /// Declined or errored
    Failure,
}

impl PaymentStatus {
    /// Whether this status concludes the booking flow.
    ///
    /// Pending counts as settled: a bank transfer order is confirmed to the
    /// customer immediately and collected out of band.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Success | Self::Pending)
    }
}

/// One payment attempt against an order
///
/// Created once per pay event; the client never retries automatically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAttempt {
    /// Server-assigned payment record identifier
    pub id: PaymentId,
    /// Method used
    pub method: PaymentMethod,
    /// Order being paid
    pub order_id: OrderId,
    /// Amount charged
    pub amount: Money,
    /// Resulting status
    pub status: PaymentStatus,
    /// Gateway-specific transaction reference, when one was issued
    pub transaction_reference: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn money_parses_two_decimal_strings() {
        assert_eq!("10.00".parse::<Money>().unwrap(), Money::from_minor_units(1000));
        assert_eq!("25.5".parse::<Money>().unwrap(), Money::from_minor_units(2550));
        assert_eq!("45".parse::<Money>().unwrap(), Money::from_minor_units(4500));
        assert_eq!("0.05".parse::<Money>().unwrap(), Money::from_minor_units(5));
    }

    #[test]
    fn money_rejects_malformed_strings() {
        assert!("".parse::<Money>().is_err());
        assert!("-1.00".parse::<Money>().is_err());
        assert!("10.005".parse::<Money>().is_err());
        assert!("10.".parse::<Money>().is_err());
        assert!("ten".parse::<Money>().is_err());
    }

    #[test]
    fn money_displays_with_two_decimals() {
        assert_eq!(Money::from_minor_units(4500).to_string(), "45.00");
        assert_eq!(Money::from_minor_units(5).to_string(), "0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn money_serde_round_trips_as_string() {
        let money = Money::from_minor_units(1050);
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "\"10.50\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, money);
    }

    #[test]
    fn payment_method_wire_tags() {
        assert_eq!(PaymentMethod::Thawani.as_str(), "thawani");
        assert_eq!(PaymentMethod::AmwalPay.as_str(), "amwalpay");
        assert_eq!(PaymentMethod::CreditCard.as_str(), "credit_card");
        assert_eq!(PaymentMethod::BankTransfer.as_str(), "bank_transfer");
    }

    #[test]
    fn pending_payment_is_settled() {
        assert!(PaymentStatus::Success.is_settled());
        assert!(PaymentStatus::Pending.is_settled());
        assert!(!PaymentStatus::Failure.is_settled());
    }
}
