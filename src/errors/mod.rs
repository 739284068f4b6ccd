//! Error types for the order core

use rust_decimal::Decimal;
use thiserror::Error;

/// Broad classification of an order-core failure.
///
/// The HTTP layer maps these to response classes (4xx/5xx) without
/// inspecting message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad input shape or values.
    Validation,
    /// A business rule rejected the request.
    BusinessRule,
    /// An internal budget was exhausted; alert-worthy.
    ResourceExhaustion,
    /// Unexpected persistence failure.
    Persistence,
}

/// Reason a promo code failed validation.
///
/// Checks run in this order; the first failing check is the rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromoRejection {
    /// Code does not exist or was soft-deleted.
    #[error("promo code not found")]
    NotFound,
    /// Code exists but is switched off.
    #[error("promo code is not active")]
    Inactive,
    /// Code expired before the order was placed.
    #[error("promo code has expired")]
    Expired,
    /// Usage counter reached the configured limit.
    #[error("promo code usage limit reached")]
    UsageLimitReached,
    /// Order subtotal is below the code's minimum.
    #[error("order subtotal does not meet the promo minimum of {required}")]
    MinimumSubtotalNotMet {
        /// Minimum subtotal the code requires.
        required: Decimal,
    },
}

/// Malformed configuration rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A numeric field was present but not a number or numeric string.
    #[error("configuration value for '{key}' is not numeric")]
    InvalidNumber {
        /// Configuration key that carried the bad value.
        key: String,
    },
    /// A value had a shape the parser does not recognize.
    #[error("configuration value for '{key}' has an unrecognized shape")]
    InvalidShape {
        /// Configuration key that carried the bad value.
        key: String,
    },
    /// The free-delivery schedule named an unknown weekday.
    #[error("unknown weekday '{name}' in free delivery schedule")]
    UnknownWeekday {
        /// Weekday name as it appeared in the row.
        name: String,
    },
}

/// Failures raised by a store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Shared state lock was poisoned.
    #[error("failed to acquire store lock")]
    LockPoisoned,
    /// A relative update would violate a constraint.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    /// A record required mid-transaction has disappeared.
    #[error("record missing: {0}")]
    RecordMissing(String),
    /// Backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Order placement errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    /// Cart contained no line items.
    #[error("cannot place an order without items")]
    NoItems,
    /// A line item carried a zero quantity.
    #[error("invalid quantity for {0}")]
    InvalidQuantity(String),
    /// Payment method is not accepted on this path.
    #[error("payment method '{0}' is not accepted for this order")]
    InvalidPaymentMethod(String),
    /// Computed order total was not a positive amount.
    #[error("order total must be a positive amount")]
    InvalidTotal,
    /// Delivery orders require a delivery date.
    #[error("a delivery date is required for delivery orders")]
    DeliveryDateRequired,
    /// Delivery date is before today.
    #[error("delivery date must be today or later")]
    DeliveryDateInPast,
    /// Date/city combination is not serviced.
    #[error("delivery is not available in {city} on {date}")]
    DeliveryNotAvailable {
        /// Requested city, as supplied.
        city: String,
        /// Requested delivery date.
        date: chrono::NaiveDate,
    },
    /// Delivery address could not be loaded.
    #[error("delivery address not found")]
    AddressNotFound,
    /// No in-store pickup point is configured.
    #[error("pickup location is not configured")]
    PickupLocationNotConfigured,
    /// Product is missing, inactive, or soft-deleted.
    #[error("product '{0}' is not available")]
    ProductUnavailable(String),
    /// Requested quantity exceeds current stock.
    #[error("insufficient stock for {product}")]
    InsufficientStock {
        /// Product display name.
        product: String,
        /// Stock currently on hand.
        available: i64,
        /// Quantity the order asked for.
        requested: u32,
    },
    /// Live price no longer matches the priced value.
    #[error("the price of '{product}' has changed, please re-quote the order")]
    PriceMismatch {
        /// Product display name.
        product: String,
    },
    /// Order-number allocation budget exhausted.
    #[error("unable to allocate an order number")]
    OrderNumberExhausted,
    /// Promo code failed validation.
    #[error("promo code rejected: {0}")]
    PromoRejected(#[from] PromoRejection),
    /// Walk-in sentinel user could not be found or created.
    #[error("walk-in customer is not configured")]
    WalkInCustomerNotConfigured,
    /// Order lookup failed for a status operation.
    #[error("order not found: {0}")]
    OrderNotFound(String),
    /// Requested status change is not allowed.
    #[error("cannot change order status from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status display name.
        from: &'static str,
        /// Requested status display name.
        to: &'static str,
    },
    /// Configuration rows failed to parse.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Unexpected persistence failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl OrderError {
    /// Classifies this error for the response-mapping layer.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NoItems
            | Self::InvalidQuantity(_)
            | Self::InvalidPaymentMethod(_)
            | Self::InvalidTotal
            | Self::DeliveryDateRequired
            | Self::DeliveryDateInPast => ErrorClass::Validation,
            Self::DeliveryNotAvailable { .. }
            | Self::AddressNotFound
            | Self::PickupLocationNotConfigured
            | Self::ProductUnavailable(_)
            | Self::InsufficientStock { .. }
            | Self::PriceMismatch { .. }
            | Self::PromoRejected(_)
            | Self::WalkInCustomerNotConfigured
            | Self::OrderNotFound(_)
            | Self::InvalidStatusTransition { .. }
            | Self::Config(_) => ErrorClass::BusinessRule,
            Self::OrderNumberExhausted => ErrorClass::ResourceExhaustion,
            Self::Storage(_) => ErrorClass::Persistence,
        }
    }

    /// Message suitable for showing to the end user.
    ///
    /// Classified conditions carry their own actionable text; persistence
    /// failures fall back to a generic message, with a best-effort rewrite
    /// of a few well-known backend phrasings (stock, phone, references).
    /// The full detail is expected to be logged by the caller.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InsufficientStock { product, .. } => {
                format!("Insufficient stock for {}", product)
            },
            Self::Storage(err) => rewrite_persistence_message(&err.to_string()),
            other => other.to_string(),
        }
    }
}

/// Best-effort cosmetic mapping of backend error text.
///
/// Only reached for failures with no structured variant; everything the
/// core can classify is raised as a typed `OrderError` instead.
fn rewrite_persistence_message(detail: &str) -> String {
    let lower = detail.to_lowercase();
    if lower.contains("stock") {
        "One of the items just went out of stock. Please review your cart.".to_string()
    } else if lower.contains("phone") {
        "The phone number could not be saved. Please check the format.".to_string()
    } else if lower.contains("foreign key") || lower.contains("reference") {
        "The order referred to a record that no longer exists.".to_string()
    } else {
        "Failed to process the order. Please try again.".to_string()
    }
}

/// Result type for order operations.
pub type OrderResult<T> = Result<T, OrderError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert_eq!(OrderError::NoItems.class(), ErrorClass::Validation);
        assert_eq!(
            OrderError::InsufficientStock {
                product:   "Dosa Batter".to_string(),
                available: 0,
                requested: 2,
            }
            .class(),
            ErrorClass::BusinessRule
        );
        assert_eq!(
            OrderError::OrderNumberExhausted.class(),
            ErrorClass::ResourceExhaustion
        );
        assert_eq!(
            OrderError::Storage(StorageError::LockPoisoned).class(),
            ErrorClass::Persistence
        );
    }

    #[test]
    fn test_stock_message_names_the_product() {
        let err = OrderError::InsufficientStock {
            product:   "Dosa Batter".to_string(),
            available: 1,
            requested: 3,
        };
        assert_eq!(err.user_message(), "Insufficient stock for Dosa Batter");
    }

    #[test]
    fn test_persistence_messages_are_rewritten() {
        let stock = OrderError::Storage(StorageError::ConstraintViolation(
            "stock would fall below zero for Dosa Batter".to_string(),
        ));
        assert!(stock.user_message().contains("out of stock"));

        let opaque =
            OrderError::Storage(StorageError::Backend("connection reset by peer".to_string()));
        assert_eq!(
            opaque.user_message(),
            "Failed to process the order. Please try again."
        );
    }
}
