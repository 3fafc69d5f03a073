use crate::config::{ConfigError, GateConfig};
use accessgate_client::{EnvelopeShape, TransportStrategy};
use serial_test::serial;
use std::env;
use std::time::Duration;

const ALL_VARS: &[&str] = &[
    "ACCESSGATE_ENDPOINT",
    "ACCESSGATE_TRANSPORT",
    "ACCESSGATE_DISPATCH_ACTION",
    "ACCESSGATE_ENVELOPE",
    "ACCESSGATE_REQUEST_TIMEOUT_SECS",
    "ACCESSGATE_TOKEN_PARAM",
    "ACCESSGATE_TOKEN_PREFIX",
    "ACCESSGATE_WARNING_DAYS",
    "ACCESSGATE_PURCHASE_URL",
    "ACCESSGATE_EXTEND_URL",
    "ACCESSGATE_LOADING_ID",
    "ACCESSGATE_CONTENT_ID",
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_config_from_env_defaults() {
    clear_env();

    let config = GateConfig::from_env().unwrap();

    assert_eq!(
        config.client.endpoint.as_str(),
        "https://www.myfairclaim.com/wp-json/mfc/v1/validate-token"
    );
    assert_eq!(config.client.transport, TransportStrategy::GetQuery);
    assert_eq!(config.client.envelope, EnvelopeShape::Auto);
    assert!(config.client.timeout.is_none());
    assert_eq!(config.token_param, "token");
    assert_eq!(config.token_format.prefix(), "MFC_");
    assert_eq!(config.warning_days, 30);
    assert_eq!(config.links.purchase, "https://www.myfairclaim.com/pricing");
    assert_eq!(config.links.extend, "https://www.myfairclaim.com/extend-access");
    assert_eq!(config.layout.loading_id, "loading-screen");
    assert_eq!(config.layout.content_id, "tool-content");
}

#[test]
#[serial]
fn test_config_dispatcher_uses_configured_action() {
    clear_env();
    env::set_var("ACCESSGATE_TRANSPORT", "get-dispatcher");
    env::set_var("ACCESSGATE_DISPATCH_ACTION", "check_access");
    env::set_var("ACCESSGATE_ENVELOPE", "nested");

    let config = GateConfig::from_env().unwrap();

    assert_eq!(
        config.client.transport,
        TransportStrategy::GetDispatcher {
            action: "check_access".to_string()
        }
    );
    assert_eq!(config.client.envelope, EnvelopeShape::Nested);

    clear_env();
}

#[test]
#[serial]
fn test_config_custom_values() {
    clear_env();
    env::set_var("ACCESSGATE_ENDPOINT", "http://localhost:8080/validate");
    env::set_var("ACCESSGATE_TRANSPORT", "post-json");
    env::set_var("ACCESSGATE_REQUEST_TIMEOUT_SECS", "15");
    env::set_var("ACCESSGATE_WARNING_DAYS", "7");
    env::set_var("ACCESSGATE_TOKEN_PARAM", "access");
    env::set_var("ACCESSGATE_EXTEND_URL", "https://shop.example.com/extend");

    let config = GateConfig::from_env().unwrap();

    assert_eq!(config.client.endpoint.as_str(), "http://localhost:8080/validate");
    assert_eq!(config.client.transport, TransportStrategy::PostJson);
    assert_eq!(config.client.timeout, Some(Duration::from_secs(15)));
    assert_eq!(config.warning_days, 7);
    assert_eq!(config.token_param, "access");
    assert_eq!(config.links.extend, "https://shop.example.com/extend");

    clear_env();
}

#[test]
#[serial]
fn test_config_invalid_timeout() {
    clear_env();
    env::set_var("ACCESSGATE_REQUEST_TIMEOUT_SECS", "soon");

    let result = GateConfig::from_env();
    assert!(matches!(
        result,
        Err(ConfigError::InvalidNumber {
            var: "ACCESSGATE_REQUEST_TIMEOUT_SECS",
            ..
        })
    ));

    clear_env();
}

#[test]
#[serial]
fn test_config_zero_timeout_rejected() {
    clear_env();
    env::set_var("ACCESSGATE_REQUEST_TIMEOUT_SECS", "0");

    assert!(matches!(GateConfig::from_env(), Err(ConfigError::Client(_))));

    clear_env();
}

#[test]
#[serial]
fn test_config_invalid_endpoint() {
    clear_env();
    env::set_var("ACCESSGATE_ENDPOINT", "ftp://files.example.com/validate");

    assert!(matches!(
        GateConfig::from_env(),
        Err(ConfigError::InvalidUrl {
            var: "ACCESSGATE_ENDPOINT",
            ..
        })
    ));

    clear_env();
}

#[test]
#[serial]
fn test_config_unknown_transport() {
    clear_env();
    env::set_var("ACCESSGATE_TRANSPORT", "carrier-pigeon");

    assert!(matches!(GateConfig::from_env(), Err(ConfigError::Client(_))));

    clear_env();
}

#[test]
#[serial]
fn test_config_blank_values_fall_back_to_defaults() {
    clear_env();
    env::set_var("ACCESSGATE_WARNING_DAYS", "  ");
    env::set_var("ACCESSGATE_TOKEN_PREFIX", "");

    let config = GateConfig::from_env().unwrap();
    assert_eq!(config.warning_days, 30);
    assert_eq!(config.token_format.prefix(), "MFC_");

    clear_env();
}

#[test]
fn test_for_endpoint_uses_defaults() {
    let config = GateConfig::for_endpoint("http://127.0.0.1:9000/validate").unwrap();
    assert_eq!(config.client.endpoint.as_str(), "http://127.0.0.1:9000/validate");
    assert_eq!(config.token_param, "token");

    assert!(GateConfig::for_endpoint("").is_err());
    assert!(GateConfig::for_endpoint("not a url").is_err());
}

#[test]
fn test_summary_reports_effective_settings() {
    let summary = GateConfig::for_endpoint("http://127.0.0.1:9000/validate")
        .unwrap()
        .summary();
    assert_eq!(summary.transport, "get-query");
    assert_eq!(summary.envelope, "auto");
    assert_eq!(summary.timeout_secs, None);
    assert_eq!(summary.token_prefix, "MFC_");
}
