//! Reducer for the booking wizard state machine.

use crate::error::BookingError;
use crate::orders::OrderRequest;
use crate::payments::PaymentRequest;
use crate::wizard::{BookingAction, BookingEnvironment, BookingState, BookingStep};
use makankom_core::{effect::Effect, reducer::Reducer};

/// The booking wizard reducer.
///
/// Sequences selection → order creation → payment through the named steps,
/// handling back/forward navigation, validation gates, and error display.
/// All service calls leave as effects; their outcomes come back as actions.
pub struct BookingWizard;

impl BookingWizard {
    /// Create a new booking wizard reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BookingWizard {
    fn clone(&self) -> Self {
        Self
    }
}

impl Reducer for BookingWizard {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per transition of the state machine
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Vec<Effect<Self::Action>> {
        match (state.step.clone(), action) {
            // ----- SelectingTickets -----
            (
                BookingStep::SelectingTickets,
                BookingAction::SetQuantity {
                    ticket_type_id,
                    quantity,
                },
            ) => {
                match state.event.ticket_type(ticket_type_id).cloned() {
                    Some(ticket_type) => {
                        match state.selection.set_quantity(&ticket_type, quantity) {
                            Ok(()) => state.error = None,
                            // Over-availability: selection unchanged, error surfaced
                            Err(error) => state.error = Some(error),
                        }
                    },
                    None => {
                        state.error = Some(BookingError::NotFound(format!(
                            "ticket type {ticket_type_id} is not on sale for this event"
                        )));
                    },
                }
                vec![Effect::None]
            },

            (BookingStep::SelectingTickets, BookingAction::RemoveSelection { ticket_type_id }) => {
                state.selection.remove(ticket_type_id);
                vec![Effect::None]
            },

            (BookingStep::SelectingTickets, BookingAction::Advance) => {
                if state.selection.is_empty() {
                    state.error = Some(BookingError::Validation(
                        "select at least one ticket to continue".to_string(),
                    ));
                } else {
                    state.step = BookingStep::ReviewingOrder;
                    state.error = None;
                }
                vec![Effect::None]
            },

            // ----- ReviewingOrder -----
            (BookingStep::ReviewingOrder, BookingAction::Advance) => {
                // Suppress a second submission while one is outstanding.
                // There is no server-side idempotency key; this flag is the
                // only thing standing between one click and two orders.
                if state.request_in_flight {
                    tracing::debug!("Order submission already in flight, suppressing advance");
                    return vec![Effect::None];
                }

                state.request_in_flight = true;
                state.error = None;

                let request = OrderRequest {
                    event_id: state.event.id,
                    lines: state.selection.order_lines(),
                };
                let orders = env.orders();

                vec![Effect::future(async move {
                    match orders.create_order(request).await {
                        Ok(order) => Some(BookingAction::OrderAccepted { order }),
                        Err(error) => Some(BookingAction::OrderRejected { error }),
                    }
                })]
            },

            (BookingStep::ReviewingOrder, BookingAction::Back) => {
                // While a submission is outstanding the step must stay put:
                // leaving ReviewingOrder would strand the in-flight flag and
                // orphan the order the server is about to create.
                if state.request_in_flight {
                    tracing::debug!("Order submission in flight, suppressing back");
                    return vec![Effect::None];
                }
                state.step = BookingStep::SelectingTickets;
                state.error = None;
                vec![Effect::None]
            },

            (BookingStep::ReviewingOrder, BookingAction::OrderAccepted { order }) => {
                if state.request_in_flight {
                    tracing::info!(order_id = %order.id, order_number = %order.order_number, "Order created");
                    state.step = BookingStep::AwaitingPayment { order };
                    state.request_in_flight = false;
                    state.error = None;
                }
                vec![Effect::None]
            },

            (BookingStep::ReviewingOrder, BookingAction::OrderRejected { error }) => {
                // Stay in ReviewingOrder; the selection is untouched so the
                // user can adjust and resubmit.
                tracing::warn!(%error, "Order submission rejected");
                state.request_in_flight = false;
                state.error = Some(error);
                vec![Effect::None]
            },

            // ----- AwaitingPayment -----
            (BookingStep::AwaitingPayment { .. }, BookingAction::Back) => {
                // Irrevocable once created: the server holds the order and
                // this flow has no cancellation call.
                state.error = Some(BookingError::Validation(
                    "the order has already been created and cannot be changed".to_string(),
                ));
                vec![Effect::None]
            },

            (BookingStep::AwaitingPayment { order }, BookingAction::Pay { method }) => {
                if state.request_in_flight {
                    tracing::debug!("Payment already in flight, suppressing pay");
                    return vec![Effect::None];
                }

                state.request_in_flight = true;
                state.error = None;

                let request = PaymentRequest {
                    order_id: order.id,
                    amount: order.total_amount,
                    method,
                };
                let payments = env.payments();

                vec![Effect::future(async move {
                    match payments.process_payment(request).await {
                        Ok(attempt) if attempt.status.is_settled() => {
                            Some(BookingAction::PaymentSettled { attempt })
                        },
                        Ok(attempt) => Some(BookingAction::PaymentDeclined {
                            reason: format!("{} payment was declined", attempt.method),
                        }),
                        Err(error) => Some(BookingAction::PaymentDeclined {
                            reason: error.to_string(),
                        }),
                    }
                })]
            },

            (BookingStep::AwaitingPayment { order }, BookingAction::PaymentSettled { attempt })
                if attempt.order_id == order.id =>
            {
                tracing::info!(order_id = %order.id, status = ?attempt.status, "Payment settled");
                state.step = BookingStep::Completed {
                    order,
                    payment: attempt,
                    completed_at: env.clock().now(),
                };
                state.request_in_flight = false;
                state.error = None;
                vec![Effect::None]
            },

            (BookingStep::AwaitingPayment { .. }, BookingAction::PaymentDeclined { reason }) => {
                // Stay in AwaitingPayment; the user may resubmit with the
                // same or a different method.
                tracing::warn!(%reason, "Payment declined");
                state.request_in_flight = false;
                state.error = Some(BookingError::PaymentFailed(reason));
                vec![Effect::None]
            },

            // ----- Completed (terminal) -----
            // Every further event, including a repeated pay, is a no-op.
            (BookingStep::Completed { .. }, _) => vec![Effect::None],

            // Anything else is an out-of-step event (stale service outcome,
            // pay before an order exists) and is ignored.
            (_, _) => vec![Effect::None],
        }
    }
}
