//! # Order Pricing Engine
//!
//! Pure pricing computations: per-charge amounts with their waive
//! overrides, promo discount amounts, and the final total. Every input
//! is threaded in explicitly (charge policy, eligibility, order type) so
//! the same call always prices the same way; nothing here reads shared
//! state.
//!
//! Waived charges keep their pre-waive value in the `original_*` fields
//! so a receipt can render "$X - WAIVED" instead of a silent zero.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::implementation::order_placement::types::{DeliveryType, SaleChannel};
use crate::types::promotion::DiscountType;
use crate::types::store_config::ChargeConfig;

#[cfg(test)]
mod tests;

/// Per-charge breakdown for one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderCharges {
    /// Tax actually charged.
    pub tax:                         Decimal,
    /// Tax before any waiver.
    pub original_tax:                Decimal,
    /// Whether tax was waived by configuration.
    pub tax_waived:                  bool,
    /// Convenience charge actually charged.
    pub convenience_charge:          Decimal,
    /// Convenience charge before waiver or in-person override.
    pub original_convenience_charge: Decimal,
    /// Whether the convenience charge was waived by configuration.
    pub convenience_waived:          bool,
    /// Delivery charge actually charged.
    pub delivery_charge:             Decimal,
    /// Delivery charge before waiver, pickup, or free-delivery override.
    pub original_delivery_charge:    Decimal,
    /// Whether the delivery charge was waived by configuration.
    pub delivery_waived:             bool,
}

/// Flat totals structure used for both receipts and persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    /// Line-item subtotal.
    pub subtotal:           Decimal,
    /// Tax charged.
    pub tax:                Decimal,
    /// Tax rate used, for display.
    pub tax_rate:           Decimal,
    /// Convenience charge.
    pub convenience_charge: Decimal,
    /// Delivery charge.
    pub delivery_charge:    Decimal,
    /// Discount applied.
    pub discount:           Decimal,
    /// Final total, never negative.
    pub total:              Decimal,
}

/// Computes the charge breakdown for an order.
///
/// Pickup orders and in-store sales never carry a convenience charge;
/// that override sits on top of the configured waive flag. The delivery
/// charge is zero for pickup, for free-delivery-eligible orders, and
/// when waived.
#[must_use]
pub fn calculate_order_charges(
    subtotal: Decimal, config: &ChargeConfig, is_free_delivery: bool,
    delivery_type: DeliveryType, channel: SaleChannel,
) -> OrderCharges {
    let original_tax = subtotal * config.tax.percent / Decimal::ONE_HUNDRED;
    let tax = if config.tax.waive { Decimal::ZERO } else { original_tax };

    let in_person = delivery_type == DeliveryType::Pickup || channel == SaleChannel::InStore;
    let original_convenience_charge = config.convenience.amount;
    let convenience_charge = if in_person || config.convenience.waive {
        Decimal::ZERO
    } else {
        original_convenience_charge
    };

    let original_delivery_charge = config.delivery.amount;
    let delivery_charge = if delivery_type == DeliveryType::Pickup
        || is_free_delivery
        || config.delivery.waive
    {
        Decimal::ZERO
    } else {
        original_delivery_charge
    };

    OrderCharges {
        tax,
        original_tax,
        tax_waived: config.tax.waive,
        convenience_charge,
        original_convenience_charge,
        convenience_waived: config.convenience.waive,
        delivery_charge,
        original_delivery_charge,
        delivery_waived: config.delivery.waive,
    }
}

/// Sums the final totals, clamping the result at zero.
///
/// The discount was already bounded when it was computed; the clamp here
/// is the second safety net so no combination of inputs produces a
/// negative total.
#[must_use]
pub fn calculate_order_total(
    subtotal: Decimal, charges: &OrderCharges, discount: Decimal, tax_rate: Decimal,
) -> OrderTotals {
    let total = (subtotal + charges.tax + charges.convenience_charge + charges.delivery_charge
        - discount)
        .max(Decimal::ZERO);

    OrderTotals {
        subtotal,
        tax: charges.tax,
        tax_rate,
        convenience_charge: charges.convenience_charge,
        delivery_charge: charges.delivery_charge,
        discount,
        total,
    }
}

/// Computes a promo discount amount against a subtotal.
///
/// Percentage discounts are capped by `max_discount` when present; flat
/// discounts are additionally clamped to the subtotal so a large code
/// can never push the post-discount subtotal negative on its own.
#[must_use]
pub fn calculate_discount_amount(
    subtotal: Decimal, discount_type: DiscountType, magnitude: Decimal,
    max_discount: Option<Decimal>,
) -> Decimal {
    let raw = match discount_type {
        DiscountType::Percentage => subtotal * magnitude / Decimal::ONE_HUNDRED,
        DiscountType::Value => magnitude.min(subtotal),
    };
    match max_discount {
        Some(cap) => raw.min(cap),
        None => raw,
    }
}

/// Rounds an amount to two decimal places for display, half away from
/// zero. Stored amounts keep full precision.
#[must_use]
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
