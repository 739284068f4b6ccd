//! # Delivery Eligibility
//!
//! Decides whether delivery is offered for a date/city pair and whether a
//! delivery order qualifies for a waived delivery charge. City comparison
//! is case-insensitive and trim-normalized on both sides, since city
//! strings are free text that usually arrives from geocoding. A weekday
//! with no schedule entry fails closed: no delivery, no waiver.

use chrono::{Datelike, NaiveDate};

use crate::implementation::order_placement::types::DeliveryType;
use crate::types::store_config::FreeDeliveryConfig;


/// Whether delivery is offered at all for this date and city.
#[must_use]
pub fn is_delivery_available(date: NaiveDate, city: &str, config: &FreeDeliveryConfig) -> bool {
    config.allows(date.weekday(), city)
}

/// Whether this order qualifies for a waived delivery charge.
///
/// Pickup orders never do; there is no delivery to waive.
#[must_use]
pub fn is_free_delivery_eligible(
    date: NaiveDate, city: &str, delivery_type: DeliveryType, config: &FreeDeliveryConfig,
) -> bool {
    delivery_type == DeliveryType::Delivery && config.allows(date.weekday(), city)
}
