use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_are_valid_and_match_the_shipped_page() {
    let cfg = LandingConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.frames.count, 40);
    assert_eq!(cfg.product.amount, 1_000_000);
    assert_eq!(cfg.product.currency, "INR");
    assert_eq!(cfg.overlays.len(), 4);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: LandingConfig =
        serde_json::from_str(r#"{ "frames": { "count": 12 }, "product": { "amount": 500 } }"#)
            .unwrap();
    assert_eq!(cfg.frames.count, 12);
    assert_eq!(cfg.frames.prefix, "ezgif-frame-");
    assert_eq!(cfg.product.amount, 500);
    assert_eq!(cfg.product.currency, "INR");
    assert_eq!(cfg.spring, SpringParams::default());
}

#[test]
fn from_json_file_validates() {
    let tmp = std::env::temp_dir().join(format!(
        "zenith_config_{}_{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::write(&tmp, r#"{ "product": { "currency": "inr" } }"#).unwrap();
    assert!(matches!(
        LandingConfig::from_json_file(&tmp),
        Err(ZenithError::Validation(_))
    ));

    std::fs::write(&tmp, "{ not json").unwrap();
    assert!(matches!(
        LandingConfig::from_json_file(&tmp),
        Err(ZenithError::Serde(_))
    ));
    std::fs::remove_file(&tmp).ok();
}

#[test]
fn credentials_require_both_secrets() {
    let creds = GatewayCredentials::from_lookup(lookup(&[
        (ENV_KEY_ID, "rzp_test_123"),
        (ENV_KEY_SECRET, "shh"),
    ]))
    .unwrap();
    assert_eq!(creds.key_id, "rzp_test_123");
    assert!(!format!("{creds:?}").contains("shh"));

    let err = GatewayCredentials::from_lookup(lookup(&[(ENV_KEY_ID, "rzp_test_123")])).unwrap_err();
    assert!(matches!(err, ZenithError::Config(_)));
    assert!(err.to_string().contains(ENV_KEY_SECRET));

    assert!(GatewayCredentials::from_lookup(lookup(&[
        (ENV_KEY_ID, " "),
        (ENV_KEY_SECRET, "x"),
    ]))
    .is_err());
}

#[test]
fn public_key_reads_its_own_variable() {
    let key = PublicKey::from_lookup(lookup(&[(ENV_PUBLIC_KEY_ID, "rzp_test_pub")])).unwrap();
    assert_eq!(key.0, "rzp_test_pub");
    assert!(PublicKey::from_lookup(lookup(&[(ENV_KEY_ID, "x")])).is_err());
}
