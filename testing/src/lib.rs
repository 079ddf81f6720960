//! # Makankom Testing
//!
//! Testing utilities and helpers for the Makankom booking architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - Property-based testing strategies for domain-adjacent values
//!
//! ## Example
//!
//! ```ignore
//! use makankom_testing::test_clock;
//!
//! #[tokio::test]
//! async fn test_booking_flow() {
//!     let env = TestBookingEnvironment::new(test_clock());
//!     let store = Store::new(BookingState::new(event), BookingWizard, env);
//!
//!     store.send(BookingAction::SetQuantity {
//!         ticket_type: TicketTypeId::new(1),
//!         quantity: 2,
//!     }).await;
//!
//!     let count = store.state(|s| s.selection.ticket_count()).await;
//!     assert_eq!(count, 2);
//! }
//! ```

use chrono::{DateTime, Utc};
use makankom_core::environment::Clock;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use makankom_testing::mocks::FixedClock;
    /// use makankom_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Property-based testing strategies using proptest.
pub mod properties {
    use proptest::prelude::*;

    /// Strategy for monetary amounts in minor units (fils/cents)
    ///
    /// Bounded so that sums over realistic cart sizes never overflow `u64`.
    pub fn minor_units() -> impl Strategy<Value = u64> {
        0u64..=10_000_000
    }

    /// Strategy for ticket quantities as a user would enter them,
    /// including zero (which means "remove the line").
    pub fn quantity() -> impl Strategy<Value = u32> {
        0u32..=20
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }
}
