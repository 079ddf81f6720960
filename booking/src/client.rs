//! HTTP client for the marketplace REST API.
//!
//! Implements the catalog, order, payment, and identity seams over JSON
//! endpoints. The bearer token is part of the client's construction, taken
//! from the explicitly passed [`Session`](crate::session::Session), never
//! read from ambient storage.

use crate::catalog::CatalogReader;
use crate::config::Config;
use crate::error::BookingError;
use crate::orders::{OrderRequest, OrderService};
use crate::payments::{PaymentGateway, PaymentRequest};
use crate::session::{IdentityProvider, Role, Session};
use crate::types::{
    Category, Event, EventFilters, EventId, Order, OrderSummary, PaymentAttempt, TicketTypeId,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Client for the marketplace API
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Api`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &Config) -> Result<Self, BookingError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| BookingError::Api(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach the session's bearer token to subsequent requests
    #[must_use]
    pub fn authenticated(mut self, session: &Session) -> Self {
        self.token = Some(session.token.clone());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn execute<T: serde::de::DeserializeOwned>(
        builder: reqwest::RequestBuilder,
    ) -> Result<T, BookingError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BookingError::Api(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| BookingError::Api(e.to_string()));
        }

        let message = response
            .json::<ApiErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| status.to_string());

        metrics::counter!("booking.api.errors", "status" => status.as_u16().to_string())
            .increment(1);

        Err(match status {
            reqwest::StatusCode::NOT_FOUND => BookingError::NotFound(message),
            reqwest::StatusCode::UNPROCESSABLE_ENTITY | reqwest::StatusCode::CONFLICT => {
                BookingError::OrderCreationFailed(message)
            },
            _ => BookingError::Api(message),
        })
    }
}

/// Error body shape the API uses for non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The order endpoint reports auth expiry and other rejections as plain
/// errors; fold them into the order-creation taxonomy so the wizard stays
/// in the review step with a displayable reason.
fn order_creation_error(error: BookingError) -> BookingError {
    match error {
        BookingError::Api(message) => BookingError::OrderCreationFailed(message),
        other => other,
    }
}

#[derive(Debug, Serialize)]
struct OrderItemBody {
    ticket_type_id: TicketTypeId,
    quantity: u32,
}

#[derive(Debug, Serialize)]
struct CreateOrderBody {
    event_id: EventId,
    items: Vec<OrderItemBody>,
}

#[derive(Debug, Serialize)]
struct OrderSummaryBody {
    items: Vec<OrderItemBody>,
}

#[derive(Debug, Serialize)]
struct CreatePaymentBody {
    order_id: crate::types::OrderId,
    amount: crate::types::Money,
    payment_method: crate::types::PaymentMethod,
}

#[derive(Debug, Deserialize)]
struct ProfileBody {
    role: Role,
    name: String,
}

fn order_items(lines: &[(TicketTypeId, u32)]) -> Vec<OrderItemBody> {
    lines
        .iter()
        .map(|&(ticket_type_id, quantity)| OrderItemBody {
            ticket_type_id,
            quantity,
        })
        .collect()
}

impl CatalogReader for ApiClient {
    fn events(
        &self,
        filters: EventFilters,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Event>, BookingError>> + Send>> {
        let builder = self.request(reqwest::Method::GET, "/events").query(&filters);
        Box::pin(async move {
            metrics::counter!("booking.api.requests", "endpoint" => "events").increment(1);
            Self::execute(builder).await
        })
    }

    fn event_by_slug(
        &self,
        slug: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Event, BookingError>> + Send>> {
        let builder = self.request(reqwest::Method::GET, &format!("/events/slug/{slug}"));
        Box::pin(async move {
            metrics::counter!("booking.api.requests", "endpoint" => "event_by_slug").increment(1);
            Self::execute(builder).await
        })
    }

    fn fetch_event(
        &self,
        event_id: EventId,
    ) -> Pin<Box<dyn Future<Output = Result<Event, BookingError>> + Send>> {
        let builder = self.request(reqwest::Method::GET, &format!("/events/{event_id}"));
        Box::pin(async move {
            metrics::counter!("booking.api.requests", "endpoint" => "fetch_event").increment(1);
            Self::execute(builder).await
        })
    }

    fn categories(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Category>, BookingError>> + Send>> {
        let builder = self.request(reqwest::Method::GET, "/event-categories");
        Box::pin(async move {
            metrics::counter!("booking.api.requests", "endpoint" => "categories").increment(1);
            Self::execute(builder).await
        })
    }
}

impl OrderService for ApiClient {
    fn create_order(
        &self,
        request: OrderRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Order, BookingError>> + Send>> {
        let body = CreateOrderBody {
            event_id: request.event_id,
            items: order_items(&request.lines),
        };
        let builder = self
            .request(reqwest::Method::POST, "/customer/orders")
            .json(&body);

        Box::pin(async move {
            metrics::counter!("booking.api.requests", "endpoint" => "create_order").increment(1);
            tracing::debug!(event_id = %body.event_id, lines = body.items.len(), "Submitting order");
            Self::execute(builder).await.map_err(order_creation_error)
        })
    }

    fn order_summary(
        &self,
        request: OrderRequest,
    ) -> Pin<Box<dyn Future<Output = Result<OrderSummary, BookingError>> + Send>> {
        let body = OrderSummaryBody {
            items: order_items(&request.lines),
        };
        let builder = self
            .request(reqwest::Method::POST, "/customer/orders/summary")
            .json(&body);

        Box::pin(async move {
            metrics::counter!("booking.api.requests", "endpoint" => "order_summary").increment(1);
            Self::execute(builder).await
        })
    }
}

impl PaymentGateway for ApiClient {
    fn process_payment(
        &self,
        request: PaymentRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PaymentAttempt, BookingError>> + Send>> {
        let body = CreatePaymentBody {
            order_id: request.order_id,
            amount: request.amount,
            payment_method: request.method,
        };
        let builder = self
            .request(reqwest::Method::POST, "/customer/payments")
            .json(&body);

        Box::pin(async move {
            metrics::counter!("booking.api.requests", "endpoint" => "process_payment").increment(1);
            tracing::debug!(order_id = %body.order_id, method = %body.payment_method, "Initiating payment");
            match Self::execute::<PaymentAttempt>(builder).await {
                Ok(attempt) => Ok(attempt),
                // The payment service reports gateway declines as errors
                Err(BookingError::Api(message)) => Err(BookingError::PaymentFailed(message)),
                Err(other) => Err(other),
            }
        })
    }
}

impl IdentityProvider for ApiClient {
    fn whoami(&self) -> Pin<Box<dyn Future<Output = Result<Session, BookingError>> + Send>> {
        let token = self.token.clone();
        let builder = self.request(reqwest::Method::GET, "/whoami");

        Box::pin(async move {
            let Some(token) = token else {
                return Err(BookingError::NotFound("no active session".to_string()));
            };

            metrics::counter!("booking.api.requests", "endpoint" => "whoami").increment(1);
            let profile: ProfileBody = Self::execute(builder).await?;
            Ok(Session {
                role: profile.role,
                token,
                display_name: profile.name,
            })
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn order_path_folds_auth_failures_into_creation_errors() {
        let mapped = order_creation_error(BookingError::Api("401 Unauthorized".to_string()));
        assert_eq!(
            mapped,
            BookingError::OrderCreationFailed("401 Unauthorized".to_string())
        );

        let passthrough = order_creation_error(BookingError::NotFound("gone".to_string()));
        assert_eq!(passthrough, BookingError::NotFound("gone".to_string()));
    }
}
