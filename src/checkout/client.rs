use serde::{Deserialize, Serialize};

use crate::{
    checkout::{order::Order, server::ORDERS_ROUTE},
    config::{Prefill, ProductConfig, PublicKey},
    foundation::error::ZenithResult,
};

pub const GENERIC_FAILURE: &str =
    "An error occurred while initiating the purchase. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub color: String,
}

/// Options handed to the payment widget constructor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckoutOptions {
    pub key: String,
    pub amount: u64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub prefill: Prefill,
    pub theme: Theme,
}

/// Payload the widget passes to its success handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
}

impl PaymentConfirmation {
    pub fn success_message(&self) -> String {
        format!("Payment Successful! Payment ID: {}", self.razorpay_payment_id)
    }
}

/// External checkout widget; drives the payment flow once opened.
pub trait PaymentWidget {
    fn open(&mut self, options: &CheckoutOptions) -> ZenithResult<()>;
}

/// Blocking user-facing notices.
pub trait AlertSink {
    fn alert(&mut self, message: &str);
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The order route answered without an order id.
    #[error("Failed to create order: {0}")]
    OrderRejected(String),

    /// Transport, decoding or widget failure.
    #[error("{0}")]
    Unexpected(String),
}

impl CheckoutError {
    /// Text shown to the shopper.
    pub fn user_message(&self) -> String {
        match self {
            Self::OrderRejected(_) => self.to_string(),
            Self::Unexpected(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Opened(CheckoutOptions),
    Failed(CheckoutError),
}

/// Browser-side half of the order exchange.
pub struct CheckoutClient {
    orders_url: String,
    public_key: PublicKey,
    product: ProductConfig,
    agent: ureq::Agent,
}

#[derive(Deserialize)]
struct OrderReply {
    id: Option<String>,
    amount: Option<u64>,
    currency: Option<String>,
    error: Option<String>,
}

impl CheckoutClient {
    pub fn new(base_url: &str, public_key: PublicKey, product: ProductConfig) -> Self {
        Self {
            orders_url: format!("{}{ORDERS_ROUTE}", base_url.trim_end_matches('/')),
            public_key,
            product,
            agent: ureq::Agent::new(),
        }
    }

    pub fn orders_url(&self) -> &str {
        &self.orders_url
    }

    /// POST the order route; any reply without an `id` is a rejection.
    pub fn request_order(&self) -> Result<Order, CheckoutError> {
        let response = match self
            .agent
            .post(&self.orders_url)
            .set("Content-Type", "application/json")
            .call()
        {
            Ok(r) => r,
            Err(ureq::Error::Status(_, r)) => r,
            Err(ureq::Error::Transport(t)) => {
                return Err(CheckoutError::Unexpected(t.to_string()));
            }
        };
        let reply: OrderReply = response
            .into_json()
            .map_err(|e| CheckoutError::Unexpected(format!("decode order reply: {e}")))?;

        match reply {
            OrderReply {
                id: Some(id),
                amount: Some(amount),
                currency: Some(currency),
                ..
            } => Ok(Order {
                id,
                amount,
                currency,
            }),
            OrderReply {
                id: Some(_), ..
            } => Err(CheckoutError::Unexpected(
                "order reply is missing amount or currency".to_string(),
            )),
            OrderReply { error, .. } => Err(CheckoutError::OrderRejected(
                error.unwrap_or_else(|| "Unknown error".to_string()),
            )),
        }
    }

    pub fn options_for(&self, order: &Order) -> CheckoutOptions {
        CheckoutOptions {
            key: self.public_key.0.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: self.product.display_name.clone(),
            description: self.product.description.clone(),
            order_id: order.id.clone(),
            prefill: self.product.prefill.clone(),
            theme: Theme {
                color: self.product.theme_color.clone(),
            },
        }
    }

    /// Mint an order and open the widget; failures are alerted and never reach the widget.
    pub fn begin_checkout(
        &self,
        widget: &mut dyn PaymentWidget,
        alerts: &mut dyn AlertSink,
    ) -> CheckoutOutcome {
        let result = self.request_order().and_then(|order| {
            let options = self.options_for(&order);
            widget
                .open(&options)
                .map_err(|e| CheckoutError::Unexpected(format!("open payment widget: {e}")))?;
            Ok(options)
        });

        match result {
            Ok(options) => {
                tracing::info!(order_id = %options.order_id, "checkout opened");
                CheckoutOutcome::Opened(options)
            }
            Err(err) => {
                tracing::error!(error = %err, "error initiating purchase");
                alerts.alert(&err.user_message());
                CheckoutOutcome::Failed(err)
            }
        }
    }

    /// Widget success handler.
    pub fn confirm(&self, confirmation: &PaymentConfirmation, alerts: &mut dyn AlertSink) {
        tracing::info!(payment_id = %confirmation.razorpay_payment_id, "payment confirmed");
        alerts.alert(&confirmation.success_message());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/checkout/client.rs"]
mod tests;
