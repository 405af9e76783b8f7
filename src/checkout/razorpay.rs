use crate::{
    checkout::order::{GatewayError, Order, OrderGateway, OrderRequest},
    config::GatewayCredentials,
};

pub const RAZORPAY_API_BASE: &str = "https://api.razorpay.com/v1";

/// Razorpay Orders API over HTTPS with basic auth.
pub struct RazorpayGateway {
    base_url: String,
    credentials: GatewayCredentials,
    agent: ureq::Agent,
}

impl std::fmt::Debug for RazorpayGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayGateway")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl RazorpayGateway {
    pub fn new(credentials: GatewayCredentials) -> Self {
        Self::with_base_url(credentials, RAZORPAY_API_BASE)
    }

    /// Point at a different API root (sandbox proxies, local fixtures).
    pub fn with_base_url(credentials: GatewayCredentials, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            agent: ureq::Agent::new(),
        }
    }

    pub fn orders_url(&self) -> String {
        format!("{}/orders", self.base_url)
    }

    fn authorization(&self) -> String {
        let pair = format!(
            "{}:{}",
            self.credentials.key_id, self.credentials.key_secret
        );
        format!("Basic {}", base64_simd::STANDARD.encode_to_string(pair))
    }
}

impl OrderGateway for RazorpayGateway {
    fn create_order(&self, request: &OrderRequest) -> Result<Order, GatewayError> {
        let url = self.orders_url();
        tracing::debug!(%url, receipt = %request.receipt, "creating gateway order");
        let result = self
            .agent
            .post(&url)
            .set("Authorization", &self.authorization())
            .send_json(request);

        match result {
            Ok(response) => response
                .into_json::<Order>()
                .map_err(|e| GatewayError::InvalidResponse(format!("read order response: {e}"))),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(GatewayError::Rejected {
                    status,
                    message: error_description(&body)
                        .unwrap_or_else(|| format!("gateway responded with status {status}")),
                })
            }
            Err(ureq::Error::Transport(t)) => Err(GatewayError::Transport(t.to_string())),
        }
    }
}

/// Pull `error.description` out of a gateway error body.
pub(crate) fn error_description(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("description")?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "../../tests/unit/checkout/razorpay.rs"]
mod tests;
