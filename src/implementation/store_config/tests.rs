// ============================================================================
// TESTS
// ============================================================================

use chrono::Weekday;
use rust_decimal_macros::dec;
use serde_json::json;

use super::{parse_charge_config, parse_free_delivery_config, parse_pickup_location};
use crate::errors::ConfigError;
use crate::types::store_config::RawConfigRow;

fn row(key: &str, value: serde_json::Value) -> RawConfigRow {
    RawConfigRow::new(key, value)
}

#[test]
fn test_parse_charge_config_typed_values() {
    let rows = vec![
        row("tax_percent", json!(13)),
        row("convenience_charge", json!(1.5)),
        row("delivery_charge", json!(4.99)),
        row("delivery_charge_waived", json!(true)),
    ];

    let config = parse_charge_config(&rows).expect("parse");

    assert_eq!(config.tax.percent, dec!(13));
    assert!(!config.tax.waive);
    assert_eq!(config.convenience.amount, dec!(1.5));
    assert_eq!(config.delivery.amount, dec!(4.99));
    assert!(config.delivery.waive);
}

#[test]
fn test_parse_charge_config_accepts_numeric_strings() {
    let rows = vec![
        row("tax_percent", json!("13")),
        row("delivery_charge", json!(" 4.99 ")),
    ];

    let config = parse_charge_config(&rows).expect("parse");

    assert_eq!(config.tax.percent, dec!(13));
    assert_eq!(config.delivery.amount, dec!(4.99));
}

#[test]
fn test_parse_charge_config_defaults() {
    let config = parse_charge_config(&[]).expect("parse");

    assert_eq!(config.tax.percent, dec!(0));
    assert_eq!(config.convenience.amount, dec!(0));
    assert_eq!(config.delivery.amount, dec!(0));
    assert!(!config.tax.waive);
    assert!(!config.convenience.waive);
    assert!(!config.delivery.waive);
}

#[test]
fn test_parse_charge_config_rejects_non_numeric_string() {
    let rows = vec![row("tax_percent", json!("thirteen"))];

    let err = parse_charge_config(&rows).expect_err("must fail");
    assert_eq!(err, ConfigError::InvalidNumber { key: "tax_percent".to_string() });
}

#[test]
fn test_parse_charge_config_rejects_wrong_shape() {
    let rows = vec![row("delivery_charge", json!([4.99]))];

    let err = parse_charge_config(&rows).expect_err("must fail");
    assert_eq!(err, ConfigError::InvalidShape { key: "delivery_charge".to_string() });
}

#[test]
fn test_parse_charge_config_ignores_unrelated_keys() {
    let rows = vec![
        row("store_banner_text", json!("Summer specials!")),
        row("tax_percent", json!(13)),
    ];

    let config = parse_charge_config(&rows).expect("parse");
    assert_eq!(config.tax.percent, dec!(13));
}

#[test]
fn test_parse_charge_config_is_deterministic() {
    let rows = vec![
        row("tax_percent", json!("13")),
        row("convenience_charge", json!(1.5)),
        row("tax_waived", json!(true)),
    ];

    let first = parse_charge_config(&rows).expect("first parse");
    let second = parse_charge_config(&rows).expect("second parse");
    assert_eq!(first, second);
}

#[test]
fn test_parse_free_delivery_schedule() {
    let rows = vec![row(
        "free_delivery_schedule",
        json!({ "Monday": ["Toronto", "Mississauga"], "friday": ["Toronto"] }),
    )];

    let config = parse_free_delivery_config(&rows).expect("parse");

    assert!(config.allows(Weekday::Mon, "Toronto"));
    assert!(config.allows(Weekday::Mon, "Mississauga"));
    assert!(config.allows(Weekday::Fri, "Toronto"));
    assert!(!config.allows(Weekday::Fri, "Mississauga"));
    assert!(!config.allows(Weekday::Tue, "Toronto"));
}

#[test]
fn test_parse_free_delivery_schedule_missing_row() {
    let config = parse_free_delivery_config(&[]).expect("parse");
    assert!(config.is_empty());
}

#[test]
fn test_parse_free_delivery_schedule_unknown_weekday() {
    let rows = vec![row("free_delivery_schedule", json!({ "Mondays": ["Toronto"] }))];

    let err = parse_free_delivery_config(&rows).expect_err("must fail");
    assert_eq!(err, ConfigError::UnknownWeekday { name: "Mondays".to_string() });
}

#[test]
fn test_parse_free_delivery_schedule_rejects_non_array_cities() {
    let rows = vec![row("free_delivery_schedule", json!({ "Monday": "Toronto" }))];

    assert!(parse_free_delivery_config(&rows).is_err());
}

#[test]
fn test_parse_pickup_location() {
    let rows = vec![row("pickup_location", json!("145 Queen St W"))];

    let location = parse_pickup_location(&rows).expect("parse").expect("configured");
    assert_eq!(location.label, "145 Queen St W");
}

#[test]
fn test_parse_pickup_location_blank_is_unconfigured() {
    let rows = vec![row("pickup_location", json!("   "))];

    assert!(parse_pickup_location(&rows).expect("parse").is_none());
    assert!(parse_pickup_location(&[]).expect("parse").is_none());
}
