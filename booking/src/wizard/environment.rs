//! Environment for the booking wizard reducer.

use crate::catalog::CatalogReader;
use crate::orders::OrderService;
use crate::payments::PaymentGateway;
use crate::session::IdentityProvider;
use makankom_core::environment::Clock;
use std::sync::Arc;

/// Injected dependencies for the booking wizard.
///
/// Holds the service seams behind trait objects so production wires in the
/// HTTP client and tests wire in mocks, without the reducer knowing the
/// difference.
#[derive(Clone)]
pub struct BookingEnvironment {
    clock: Arc<dyn Clock>,
    catalog: Arc<dyn CatalogReader>,
    orders: Arc<dyn OrderService>,
    payments: Arc<dyn PaymentGateway>,
    identity: Arc<dyn IdentityProvider>,
}

impl BookingEnvironment {
    /// Create a new environment from its dependencies
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        catalog: Arc<dyn CatalogReader>,
        orders: Arc<dyn OrderService>,
        payments: Arc<dyn PaymentGateway>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            clock,
            catalog,
            orders,
            payments,
            identity,
        }
    }

    /// Clock for timestamps
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Read-only catalog access
    #[must_use]
    pub fn catalog(&self) -> Arc<dyn CatalogReader> {
        Arc::clone(&self.catalog)
    }

    /// Order submission
    #[must_use]
    pub fn orders(&self) -> Arc<dyn OrderService> {
        Arc::clone(&self.orders)
    }

    /// Payment initiation
    #[must_use]
    pub fn payments(&self) -> Arc<dyn PaymentGateway> {
        Arc::clone(&self.payments)
    }

    /// Session resolution
    #[must_use]
    pub fn identity(&self) -> Arc<dyn IdentityProvider> {
        Arc::clone(&self.identity)
    }
}
