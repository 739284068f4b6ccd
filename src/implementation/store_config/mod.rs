//! # Charge Configuration Resolver
//!
//! Turns the loosely-typed settings rows into typed, per-request charge
//! and schedule snapshots. The settings table is shared with other admin
//! surfaces, so unrecognized keys are skipped; recognized keys with a
//! malformed value fail fast instead of coercing silently.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::errors::ConfigError;
use crate::types::store_config::{
    ChargeConfig, ChargeRate, FlatCharge, FreeDeliveryConfig, PickupLocation, RawConfigRow,
    KEY_CONVENIENCE_CHARGE, KEY_CONVENIENCE_CHARGE_WAIVED, KEY_DELIVERY_CHARGE,
    KEY_DELIVERY_CHARGE_WAIVED, KEY_FREE_DELIVERY_SCHEDULE, KEY_PICKUP_LOCATION, KEY_TAX_PERCENT,
    KEY_TAX_WAIVED,
};

#[cfg(test)]
mod tests;

/// Resolves the typed charge policy from raw settings rows.
///
/// Missing charges default to zero and missing waive flags to `false`.
/// Numbers stored as strings are accepted; anything else that is present
/// but not numeric is a [`ConfigError`].
pub fn parse_charge_config(rows: &[RawConfigRow]) -> Result<ChargeConfig, ConfigError> {
    let mut tax = ChargeRate::default();
    let mut convenience = FlatCharge::default();
    let mut delivery = FlatCharge::default();

    for row in rows {
        match row.key.as_str() {
            KEY_TAX_PERCENT => tax.percent = decimal_value(&row.key, &row.value)?,
            KEY_TAX_WAIVED => tax.waive = bool_value(&row.key, &row.value)?,
            KEY_CONVENIENCE_CHARGE => {
                convenience.amount = decimal_value(&row.key, &row.value)?;
            },
            KEY_CONVENIENCE_CHARGE_WAIVED => {
                convenience.waive = bool_value(&row.key, &row.value)?;
            },
            KEY_DELIVERY_CHARGE => delivery.amount = decimal_value(&row.key, &row.value)?,
            KEY_DELIVERY_CHARGE_WAIVED => delivery.waive = bool_value(&row.key, &row.value)?,
            _ => {},
        }
    }

    Ok(ChargeConfig { tax, convenience, delivery })
}

/// Resolves the weekday/city free-delivery schedule.
///
/// A missing schedule row yields an empty schedule (delivery nowhere,
/// free nowhere); malformed entries fail fast.
pub fn parse_free_delivery_config(
    rows: &[RawConfigRow],
) -> Result<FreeDeliveryConfig, ConfigError> {
    let mut config = FreeDeliveryConfig::new();

    let Some(row) = rows.iter().find(|r| r.key == KEY_FREE_DELIVERY_SCHEDULE) else {
        return Ok(config);
    };

    let Value::Object(entries) = &row.value else {
        return Err(ConfigError::InvalidShape { key: row.key.clone() });
    };

    for (day_name, cities) in entries {
        let weekday = weekday_from_name(day_name)?;
        let Value::Array(cities) = cities else {
            return Err(ConfigError::InvalidShape { key: row.key.clone() });
        };
        for city in cities {
            let Value::String(city) = city else {
                return Err(ConfigError::InvalidShape { key: row.key.clone() });
            };
            config.insert(weekday, city);
        }
    }

    Ok(config)
}

/// Resolves the configured in-store pickup point, if any.
///
/// A missing row or a blank label both mean "not configured".
pub fn parse_pickup_location(
    rows: &[RawConfigRow],
) -> Result<Option<PickupLocation>, ConfigError> {
    let Some(row) = rows.iter().find(|r| r.key == KEY_PICKUP_LOCATION) else {
        return Ok(None);
    };

    let Value::String(label) = &row.value else {
        return Err(ConfigError::InvalidShape { key: row.key.clone() });
    };

    let label = label.trim();
    if label.is_empty() {
        return Ok(None);
    }
    Ok(Some(PickupLocation::new(label)))
}

fn decimal_value(key: &str, value: &Value) -> Result<Decimal, ConfigError> {
    match value {
        Value::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .map_err(|_| ConfigError::InvalidNumber { key: key.to_string() }),
        Value::String(s) => s
            .trim()
            .parse::<Decimal>()
            .map_err(|_| ConfigError::InvalidNumber { key: key.to_string() }),
        _ => Err(ConfigError::InvalidShape { key: key.to_string() }),
    }
}

fn bool_value(key: &str, value: &Value) -> Result<bool, ConfigError> {
    match value {
        Value::Bool(b) => Ok(*b),
        _ => Err(ConfigError::InvalidShape { key: key.to_string() }),
    }
}

fn weekday_from_name(name: &str) -> Result<Weekday, ConfigError> {
    match name.trim().to_lowercase().as_str() {
        "monday" => Ok(Weekday::Mon),
        "tuesday" => Ok(Weekday::Tue),
        "wednesday" => Ok(Weekday::Wed),
        "thursday" => Ok(Weekday::Thu),
        "friday" => Ok(Weekday::Fri),
        "saturday" => Ok(Weekday::Sat),
        "sunday" => Ok(Weekday::Sun),
        _ => Err(ConfigError::UnknownWeekday { name: name.to_string() }),
    }
}
