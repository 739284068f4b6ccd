//! # Promotion Types
//!
//! Promo codes as stored by the promotions admin surface. The order core
//! reads them for validation and increments the usage counter when a
//! discount is actually applied.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Unique promo code identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PromoCodeId(pub Cow<'static, str>);

impl PromoCodeId {
    /// Creates a new promo code ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Creates a promo code ID from a static string slice (zero-copy).
    #[must_use]
    pub fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }
}

impl std::fmt::Display for PromoCodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a promo discount is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountType {
    /// Percentage of the subtotal.
    Percentage,
    /// Flat amount off.
    Value,
}

/// A promotional discount code.
#[derive(Debug, Clone)]
pub struct PromoCode {
    /// Promo code ID.
    pub id:            PromoCodeId,
    /// Human-facing code string.
    pub code:          String,
    /// Discount computation kind.
    pub discount_type: DiscountType,
    /// Percentage (0-100) or flat amount, per `discount_type`.
    pub amount:        Decimal,
    /// Cap on the computed discount, if any.
    pub max_discount:  Option<Decimal>,
    /// Whether the code is switched on.
    pub is_active:     bool,
    /// Soft-delete flag.
    pub is_deleted:    bool,
    /// Expiry timestamp; `None` never expires.
    pub expires_at:    Option<DateTime<Utc>>,
    /// Minimum subtotal required to apply, if any.
    pub min_subtotal:  Option<Decimal>,
    /// Times the code has been applied to a created order.
    pub usage_count:   u32,
    /// Cap on `usage_count`, if any.
    pub usage_limit:   Option<u32>,
}

impl PromoCode {
    /// Creates an active percentage promo code.
    #[must_use]
    pub fn percentage(id: PromoCodeId, code: impl Into<String>, percent: Decimal) -> Self {
        Self::with_type(id, code, DiscountType::Percentage, percent)
    }

    /// Creates an active flat-amount promo code.
    #[must_use]
    pub fn flat(id: PromoCodeId, code: impl Into<String>, amount: Decimal) -> Self {
        Self::with_type(id, code, DiscountType::Value, amount)
    }

    fn with_type(
        id: PromoCodeId, code: impl Into<String>, discount_type: DiscountType, amount: Decimal,
    ) -> Self {
        Self {
            id,
            code: code.into().to_uppercase(),
            discount_type,
            amount,
            max_discount: None,
            is_active: true,
            is_deleted: false,
            expires_at: None,
            min_subtotal: None,
            usage_count: 0,
            usage_limit: None,
        }
    }

    /// Caps the computed discount.
    #[must_use]
    pub fn with_max_discount(mut self, cap: Decimal) -> Self {
        self.max_discount = Some(cap);
        self
    }

    /// Sets an expiry timestamp.
    #[must_use]
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Requires a minimum subtotal.
    #[must_use]
    pub fn with_min_subtotal(mut self, min: Decimal) -> Self {
        self.min_subtotal = Some(min);
        self
    }

    /// Limits total usages.
    #[must_use]
    pub fn with_usage_limit(mut self, limit: u32) -> Self {
        self.usage_limit = Some(limit);
        self
    }

    /// Whether the code expired as of `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Whether the usage counter reached its limit.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.usage_limit.is_some_and(|limit| self.usage_count >= limit)
    }
}
