//! Main order types for the order placement flow.
//!
//! The Order struct is the persisted purchase record. Line items snapshot
//! the product name and unit price at order time, so historical orders
//! stay accurate when catalog prices move.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::basic_types::{DeliveryType, OrderId, OrderStatus, PaymentMethod};
use crate::types::catalog::{AddressId, ProductId, UserId};
use crate::types::promotion::PromoCodeId;

/// One ordered line item, snapshotted at order time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    /// Ordered product.
    pub product_id:   ProductId,
    /// Product name at order time.
    pub product_name: String,
    /// Units ordered.
    pub quantity:     u32,
    /// Unit price at order time.
    pub unit_price:   Decimal,
}

impl OrderItem {
    /// Line total (quantity × unit price).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Complete order record.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Order ID.
    pub id:                 OrderId,
    /// Human-facing order number (5 characters, A-Z0-9).
    pub order_number:       String,
    /// Owning user.
    pub user_id:            UserId,
    /// Delivery address; `None` for pickup orders.
    pub address_id:         Option<AddressId>,
    /// Snapshotted line items.
    pub items:              Vec<OrderItem>,
    /// Line-item subtotal.
    pub subtotal:           Decimal,
    /// Tax charged.
    pub tax:                Decimal,
    /// Tax rate used, for receipts.
    pub tax_rate:           Decimal,
    /// Convenience charge.
    pub convenience_charge: Decimal,
    /// Delivery charge.
    pub delivery_charge:    Decimal,
    /// Discount applied.
    pub discount:           Decimal,
    /// Final total.
    pub total:              Decimal,
    /// Order status.
    pub status:             OrderStatus,
    /// Pickup or delivery.
    pub delivery_type:      DeliveryType,
    /// Payment method.
    pub payment_method:     PaymentMethod,
    /// Requested delivery date, if any.
    pub delivery_date:      Option<NaiveDate>,
    /// Promo code applied, if any.
    pub promo_code_id:      Option<PromoCodeId>,
    /// Soft-delete flag. Deleted orders keep their number reserved.
    pub is_deleted:         bool,
    /// Creation timestamp.
    pub created_at:         DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at:         DateTime<Utc>,
}
