use std::net::TcpListener;

use super::*;

#[derive(Default)]
struct Alerts(Vec<String>);

impl AlertSink for Alerts {
    fn alert(&mut self, message: &str) {
        self.0.push(message.to_string());
    }
}

#[derive(Default)]
struct Widget(Vec<CheckoutOptions>);

impl PaymentWidget for Widget {
    fn open(&mut self, options: &CheckoutOptions) -> ZenithResult<()> {
        self.0.push(options.clone());
        Ok(())
    }
}

fn client(base: &str) -> CheckoutClient {
    CheckoutClient::new(
        base,
        PublicKey("rzp_test_pub".to_string()),
        ProductConfig::default(),
    )
}

#[test]
fn options_combine_order_with_product_metadata() {
    let c = client("http://localhost:3000/");
    assert_eq!(c.orders_url(), "http://localhost:3000/api/orders");
    let order = Order {
        id: "order_1".to_string(),
        amount: 1_000_000,
        currency: "INR".to_string(),
    };
    let opts = c.options_for(&order);
    assert_eq!(opts.key, "rzp_test_pub");
    assert_eq!(opts.order_id, "order_1");
    assert_eq!(opts.name, "Zenith X Optics");
    assert_eq!(opts.description, "Zenith X Sunglasses Purchase");

    let json = serde_json::to_value(&opts).unwrap();
    assert_eq!(json["prefill"]["email"], "customer@example.com");
    assert_eq!(json["theme"]["color"], "#050505");
    assert_eq!(json["amount"], 1_000_000);
}

#[test]
fn user_messages_distinguish_rejections() {
    let rejected = CheckoutError::OrderRejected("Authentication failed".to_string());
    assert_eq!(rejected.user_message(), "Failed to create order: Authentication failed");
    let unexpected = CheckoutError::Unexpected("connection refused".to_string());
    assert_eq!(unexpected.user_message(), GENERIC_FAILURE);
}

#[test]
fn unreachable_server_alerts_and_skips_widget() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let c = client(&format!("http://{addr}"));
    let mut widget = Widget::default();
    let mut alerts = Alerts::default();
    let outcome = c.begin_checkout(&mut widget, &mut alerts);

    assert!(matches!(outcome, CheckoutOutcome::Failed(CheckoutError::Unexpected(_))));
    assert!(widget.0.is_empty());
    assert_eq!(alerts.0, vec![GENERIC_FAILURE.to_string()]);
}

#[test]
fn confirmation_reports_payment_id() {
    let conf: PaymentConfirmation =
        serde_json::from_str(r#"{ "razorpay_payment_id": "pay_29QQoUBi66xm2f" }"#).unwrap();
    assert_eq!(conf.success_message(), "Payment Successful! Payment ID: pay_29QQoUBi66xm2f");

    let mut alerts = Alerts::default();
    client("http://localhost").confirm(&conf, &mut alerts);
    assert_eq!(alerts.0.len(), 1);
}
