//! # Data-Access Interface
//!
//! The order core talks to the relational store through these traits. A
//! production deployment backs them with the platform's database client;
//! this crate ships [`InMemoryStore`], which implements the same
//! transactional contract in memory and doubles as the reference
//! semantics for any SQL-backed implementation.
//!
//! The transactional contract: [`CommerceStore::transaction`] runs a
//! closure against a [`StoreTx`] handle and commits when the closure
//! returns `Ok`, rolling back every effect when it returns `Err`. Stock
//! and promo-usage mutations are relative updates applied atomically by
//! the store, never read-modify-write round trips at the application
//! level.

mod memory;

pub use memory::InMemoryStore;

use crate::errors::{OrderResult, StoreResult};
use crate::implementation::order_placement::types::{Order, OrderId, OrderStatus};
use crate::types::catalog::{Address, AddressId, Product, ProductId, User, UserId};
use crate::types::promotion::{PromoCode, PromoCodeId};
use crate::types::store_config::RawConfigRow;

/// Transaction-scoped data access.
///
/// Every method sees the transaction's own writes; nothing is visible to
/// concurrent readers until the enclosing transaction commits.
pub trait StoreTx {
    /// Looks up a product by ID.
    fn find_product(&self, id: &ProductId) -> StoreResult<Option<Product>>;

    /// Looks up an address by ID.
    fn find_address(&self, id: &AddressId) -> StoreResult<Option<Address>>;

    /// Looks up a promo code by ID.
    fn find_promo(&self, id: &PromoCodeId) -> StoreResult<Option<PromoCode>>;

    /// Looks up a user by ID.
    fn find_user(&self, id: &UserId) -> StoreResult<Option<User>>;

    /// Finds a user whose stored phone matches any of the given variations.
    fn find_user_by_phone(&self, variations: &[String]) -> StoreResult<Option<User>>;

    /// Finds the shared walk-in sentinel user.
    fn find_walk_in_user(&self) -> StoreResult<Option<User>>;

    /// Persists a new user.
    fn create_user(&mut self, user: &User) -> StoreResult<()>;

    /// Rewrites a user's stored phone number.
    fn update_user_phone(&mut self, id: &UserId, phone: &str) -> StoreResult<()>;

    /// Whether any order, deleted or not, carries this number.
    fn order_number_exists(&self, number: &str) -> StoreResult<bool>;

    /// Looks up an order by ID.
    fn find_order(&self, id: &OrderId) -> StoreResult<Option<Order>>;

    /// Persists an order header and its line items as one write.
    fn create_order(&mut self, order: &Order) -> StoreResult<()>;

    /// Rewrites an order's status and update timestamp.
    fn update_order_status(&mut self, id: &OrderId, status: OrderStatus) -> StoreResult<()>;

    /// Marks an order soft-deleted.
    fn soft_delete_order(&mut self, id: &OrderId) -> StoreResult<()>;

    /// Atomically decrements a product's stock by `quantity`.
    ///
    /// Fails with a constraint violation rather than driving stock
    /// negative.
    fn decrement_stock(&mut self, id: &ProductId, quantity: u32) -> StoreResult<()>;

    /// Atomically increments a promo code's usage counter.
    fn increment_promo_usage(&mut self, id: &PromoCodeId) -> StoreResult<()>;
}

/// Store handle held by the order placement service.
///
/// The read methods are usable outside a transaction for pre-flight
/// checks; anything that mutates state goes through [`Self::transaction`].
pub trait CommerceStore {
    /// Loads every raw configuration row.
    fn get_config_rows(&self) -> StoreResult<Vec<RawConfigRow>>;

    /// Looks up a product by ID.
    fn find_product(&self, id: &ProductId) -> StoreResult<Option<Product>>;

    /// Looks up an address by ID.
    fn find_address(&self, id: &AddressId) -> StoreResult<Option<Address>>;

    /// Looks up a promo code by ID.
    fn find_promo(&self, id: &PromoCodeId) -> StoreResult<Option<PromoCode>>;

    /// Looks up an order by ID.
    fn find_order(&self, id: &OrderId) -> StoreResult<Option<Order>>;

    /// Runs `f` inside one atomic transaction.
    ///
    /// Commits when `f` returns `Ok`; rolls back every effect when it
    /// returns `Err`. The error is handed back unchanged.
    fn transaction<T>(
        &self, f: &mut dyn FnMut(&mut dyn StoreTx) -> OrderResult<T>,
    ) -> OrderResult<T>;
}
