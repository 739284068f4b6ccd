//! # Catalog Types
//!
//! Products, users, and addresses as seen by the order core. These records
//! are owned by the excluded admin/catalog surfaces; the core only reads
//! them and applies atomic stock decrements through the store interface.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Unique product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(pub Cow<'static, str>);

impl ProductId {
    /// Creates a new product ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Creates a product ID from a static string slice (zero-copy).
    #[must_use]
    pub fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(pub Cow<'static, str>);

impl UserId {
    /// Creates a new user ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Creates a user ID from a static string slice (zero-copy).
    #[must_use]
    pub fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Generates a new unique user ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Cow::Owned(format!("user-{}", uuid::Uuid::new_v4())))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique address identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressId(pub Cow<'static, str>);

impl AddressId {
    /// Creates a new address ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Creates an address ID from a static string slice (zero-copy).
    #[must_use]
    pub fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }
}

impl std::fmt::Display for AddressId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// PRODUCT
// ============================================================================

/// A sellable product.
#[derive(Debug, Clone)]
pub struct Product {
    /// Product ID.
    pub id:         ProductId,
    /// Display name.
    pub name:       String,
    /// Current unit price.
    pub price:      Decimal,
    /// Units on hand.
    pub stock:      i64,
    /// Whether the product is offered for sale.
    pub is_active:  bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new active product.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal, stock: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            price,
            stock,
            is_active: true,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the product can be ordered at all.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.is_active && !self.is_deleted
    }

    /// Whether the requested quantity is in stock.
    #[must_use]
    pub fn has_stock(&self, quantity: u32) -> bool {
        self.stock >= i64::from(quantity)
    }
}

// ============================================================================
// USER
// ============================================================================

/// A customer account.
#[derive(Debug, Clone)]
pub struct User {
    /// User ID.
    pub id:         UserId,
    /// Display name.
    pub name:       String,
    /// Stored phone number, if any.
    pub phone:      Option<String>,
    /// Whether this is the shared walk-in sentinel account.
    pub is_walk_in: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new customer account.
    #[must_use]
    pub fn new(name: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            id:         UserId::generate(),
            name:       name.into(),
            phone,
            is_walk_in: false,
            created_at: Utc::now(),
        }
    }

    /// Creates the shared walk-in sentinel account.
    #[must_use]
    pub fn walk_in() -> Self {
        Self {
            id:         UserId::generate(),
            name:       "Walk-in Customer".to_string(),
            phone:      None,
            is_walk_in: true,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// ADDRESS
// ============================================================================

/// A delivery address.
#[derive(Debug, Clone)]
pub struct Address {
    /// Address ID.
    pub id:          AddressId,
    /// Owning user.
    pub user_id:     UserId,
    /// Street line.
    pub street:      String,
    /// City name (free text, often geocoded).
    pub city:        String,
    /// Postal code, if captured.
    pub postal_code: Option<String>,
}

impl Address {
    /// Creates a new address.
    #[must_use]
    pub fn new(
        id: AddressId, user_id: UserId, street: impl Into<String>, city: impl Into<String>,
    ) -> Self {
        Self { id, user_id, street: street.into(), city: city.into(), postal_code: None }
    }
}
