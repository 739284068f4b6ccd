//! # Promotion Validator
//!
//! Read-and-decide validation of promo codes. Nothing here mutates
//! state; the usage counter is incremented by the order placement
//! transaction, which re-runs the usage-limit check on its own handle so
//! two racing orders cannot both slip past a stale pre-flight read.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::errors::{OrderError, OrderResult, PromoRejection};
use crate::implementation::pricing::calculate_discount_amount;
use crate::storage::CommerceStore;
use crate::types::promotion::{PromoCode, PromoCodeId};

#[cfg(test)]
mod tests;

/// Validates a loaded promo code against a subtotal.
///
/// Checks run in a fixed order and the first failure wins: present and
/// not soft-deleted, active, not expired, usage under the limit, minimum
/// subtotal met.
pub fn check_promo(
    promo: Option<&PromoCode>, subtotal: Decimal, now: DateTime<Utc>,
) -> Result<(), PromoRejection> {
    let promo = match promo {
        Some(p) if !p.is_deleted => p,
        _ => return Err(PromoRejection::NotFound),
    };

    if !promo.is_active {
        return Err(PromoRejection::Inactive);
    }
    if promo.is_expired(now) {
        return Err(PromoRejection::Expired);
    }
    if promo.is_exhausted() {
        return Err(PromoRejection::UsageLimitReached);
    }
    if let Some(required) = promo.min_subtotal {
        if subtotal < required {
            return Err(PromoRejection::MinimumSubtotalNotMet { required });
        }
    }

    Ok(())
}

/// Pre-flight validation by promo ID against the store.
///
/// Safe to call outside a transaction (e.g. while the cart is still
/// open); the order placement flow re-validates on its transaction
/// handle before recording usage.
pub fn validate_promo_by_id<S: CommerceStore>(
    store: &S, promo_id: &PromoCodeId, subtotal: Decimal,
) -> OrderResult<PromoCode> {
    match store.find_promo(promo_id)? {
        Some(promo) => {
            check_promo(Some(&promo), subtotal, Utc::now())?;
            Ok(promo)
        },
        None => Err(OrderError::PromoRejected(PromoRejection::NotFound)),
    }
}

/// Discount amount a validated promo yields against a subtotal.
#[must_use]
pub fn discount_for(promo: &PromoCode, subtotal: Decimal) -> Decimal {
    calculate_discount_amount(subtotal, promo.discount_type, promo.amount, promo.max_discount)
}
