//! Purchase flow: order creation against Razorpay, the `/api/orders` endpoint and its browser-side client.

/// Client for the order endpoint plus checkout widget hand-off.
pub mod client;
pub mod order;
/// Razorpay Orders API gateway.
pub mod razorpay;
/// Minimal HTTP server exposing the order endpoint.
pub mod server;
