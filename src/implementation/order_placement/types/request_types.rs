//! Inbound request and receipt shapes.
//!
//! These are the payloads the (excluded) HTTP route handlers hand to the
//! placement service. Identifiers arrive as plain strings and are
//! converted to typed IDs internally.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::basic_types::{DeliveryType, PaymentMethod};

/// One cart line in an online order request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRequest {
    /// Ordered product ID.
    pub product_id: String,
    /// Units ordered.
    pub quantity:   u32,
    /// Unit price the client priced with.
    pub price:      Decimal,
}

/// Online order placement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Ordering user.
    pub user_id:        String,
    /// Delivery address; required for delivery orders.
    pub address_id:     Option<String>,
    /// Cart lines.
    pub items:          Vec<OrderItemRequest>,
    /// Promo code to apply, if any.
    pub promo_code_id:  Option<String>,
    /// Requested delivery date; required for delivery orders.
    pub delivery_date:  Option<NaiveDate>,
    /// Pickup or delivery.
    pub order_type:     DeliveryType,
    /// Payment method.
    pub payment_method: PaymentMethod,
}

/// One line of a POS sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosSaleItem {
    /// Product ID.
    pub id:       String,
    /// Product name as shown on the POS screen.
    pub name:     String,
    /// Unit price the POS priced with.
    pub price:    Decimal,
    /// Units sold.
    pub quantity: u32,
    /// Line total as computed by the POS.
    pub total:    Decimal,
}

/// Customer details captured at the POS counter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PosCustomer {
    /// Existing user ID, when the cashier picked an account.
    pub user_id: Option<String>,
    /// Phone number as typed at the counter.
    pub phone:   Option<String>,
    /// Customer name as typed at the counter.
    pub name:    Option<String>,
}

/// POS sale request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosSaleRequest {
    /// Sold lines.
    pub items:          Vec<PosSaleItem>,
    /// Customer details; `None` resolves to the walk-in account.
    pub customer:       Option<PosCustomer>,
    /// Subtotal as computed by the POS screen.
    pub subtotal:       Decimal,
    /// Tax as computed by the POS screen.
    pub tax:            Decimal,
    /// Discount as computed by the POS screen.
    pub discount:       Decimal,
    /// Total as computed by the POS screen.
    pub total:          Decimal,
    /// Payment method; only cash and card are taken at the counter.
    pub payment_method: PaymentMethod,
    /// Promo code to apply, if any.
    pub promo_code_id:  Option<String>,
}

/// Receipt returned to the POS after a successful sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosSaleReceipt {
    /// Created order ID.
    pub order_id:       String,
    /// Human-facing order number.
    pub order_number:   String,
    /// Charged total.
    pub total:          Decimal,
    /// Payment method taken.
    pub payment_method: PaymentMethod,
    /// Sale timestamp.
    pub timestamp:      DateTime<Utc>,
}
