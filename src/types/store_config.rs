//! # Store Configuration Types
//!
//! Raw configuration rows and the typed, per-request snapshots derived
//! from them. The raw rows are loosely typed (numbers sometimes stored as
//! strings, nested objects for schedules); the resolvers in
//! `implementation::store_config` turn them into these types. Snapshots
//! are rebuilt on every pricing call and never cached in the core.

use std::collections::{HashMap, HashSet};

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// CONFIGURATION KEYS
// ============================================================================

/// Key for the tax percentage row.
pub const KEY_TAX_PERCENT: &str = "tax_percent";
/// Key for the tax waive flag.
pub const KEY_TAX_WAIVED: &str = "tax_waived";
/// Key for the flat convenience charge.
pub const KEY_CONVENIENCE_CHARGE: &str = "convenience_charge";
/// Key for the convenience charge waive flag.
pub const KEY_CONVENIENCE_CHARGE_WAIVED: &str = "convenience_charge_waived";
/// Key for the flat delivery charge.
pub const KEY_DELIVERY_CHARGE: &str = "delivery_charge";
/// Key for the delivery charge waive flag.
pub const KEY_DELIVERY_CHARGE_WAIVED: &str = "delivery_charge_waived";
/// Key for the weekday/city free-delivery schedule.
pub const KEY_FREE_DELIVERY_SCHEDULE: &str = "free_delivery_schedule";
/// Key for the in-store pickup point.
pub const KEY_PICKUP_LOCATION: &str = "pickup_location";

// ============================================================================
// RAW ROWS
// ============================================================================

/// One row of the settings table, as loaded by the configuration service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawConfigRow {
    /// Configuration key.
    pub key:   String,
    /// Loosely-typed value payload.
    pub value: serde_json::Value,
}

impl RawConfigRow {
    /// Creates a new raw row.
    #[must_use]
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self { key: key.into(), value }
    }
}

// ============================================================================
// CHARGE POLICY
// ============================================================================

/// A percentage-based charge with a waive switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChargeRate {
    /// Percentage applied to the subtotal (0-100).
    pub percent: Decimal,
    /// Whether the charge is waived.
    pub waive:   bool,
}

/// A flat charge with a waive switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlatCharge {
    /// Flat amount charged.
    pub amount: Decimal,
    /// Whether the charge is waived.
    pub waive:  bool,
}

/// Typed charge policy for one pricing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChargeConfig {
    /// Tax as a percentage of the subtotal.
    pub tax:         ChargeRate,
    /// Flat convenience charge.
    pub convenience: FlatCharge,
    /// Flat delivery charge.
    pub delivery:    FlatCharge,
}

// ============================================================================
// FREE DELIVERY SCHEDULE
// ============================================================================

/// Weekday → cities eligible for (free) delivery that day.
///
/// City names are stored trim+lowercase normalized; lookups normalize the
/// query side the same way, so `"Toronto"`, `" toronto "`, and `"TORONTO"`
/// all match one schedule entry. An absent weekday means delivery is not
/// offered that day (fail closed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeDeliveryConfig {
    schedule: HashMap<Weekday, HashSet<String>>,
}

impl FreeDeliveryConfig {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a city to a weekday's entry.
    pub fn insert(&mut self, weekday: Weekday, city: &str) {
        self.schedule.entry(weekday).or_default().insert(normalize_city(city));
    }

    /// Whether the city is scheduled on the given weekday.
    #[must_use]
    pub fn allows(&self, weekday: Weekday, city: &str) -> bool {
        self.schedule
            .get(&weekday)
            .is_some_and(|cities| cities.contains(&normalize_city(city)))
    }

    /// Whether the schedule has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }
}

/// Normalizes a free-text city name for comparison.
#[must_use]
pub fn normalize_city(city: &str) -> String {
    city.trim().to_lowercase()
}

// ============================================================================
// PICKUP LOCATION
// ============================================================================

/// The configured in-store pickup point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupLocation {
    /// Display label shown on receipts and the POS.
    pub label: String,
}

impl PickupLocation {
    /// Creates a new pickup location.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}
