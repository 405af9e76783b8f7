use std::{
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use crate::config::ProductConfig;

/// Gateway order as relayed to the browser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Minor currency units.
    pub amount: u64,
    pub currency: String,
}

/// Order-creation payload, shaped as the gateway's REST API expects it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
    pub notes: BTreeMap<String, String>,
}

impl OrderRequest {
    pub fn for_product(product: &ProductConfig, now: SystemTime) -> Self {
        let mut notes = BTreeMap::new();
        notes.insert("product".to_string(), product.note.clone());
        Self {
            amount: product.amount,
            currency: product.currency.clone(),
            receipt: receipt_for(now),
            notes,
        }
    }
}

/// `receipt_<unix millis>`.
///
/// Two orders minted within the same millisecond share a receipt.
pub fn receipt_for(now: SystemTime) -> String {
    let millis = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("receipt_{millis}")
}

/// Failure reported by an [`OrderGateway`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The gateway answered with an error status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a gateway answer (DNS, TLS, connection).
    #[error("{0}")]
    Transport(String),

    /// The gateway answered 2xx with a body we could not read.
    #[error("{0}")]
    InvalidResponse(String),
}

/// Remote order-creation capability.
pub trait OrderGateway: Send + Sync {
    fn create_order(&self, request: &OrderRequest) -> Result<Order, GatewayError>;
}

impl<G: OrderGateway + ?Sized> OrderGateway for std::sync::Arc<G> {
    fn create_order(&self, request: &OrderRequest) -> Result<Order, GatewayError> {
        (**self).create_order(request)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/checkout/order.rs"]
mod tests;
