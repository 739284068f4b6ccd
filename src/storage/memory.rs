//! In-memory transactional store.
//!
//! Backs the [`CommerceStore`] contract with mutex-guarded maps. One lock
//! spans each transaction, so transactions serialize; rollback restores a
//! snapshot taken when the transaction opened. Tests and embedded
//! deployments use this store directly.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::{CommerceStore, StoreTx};
use crate::errors::{OrderResult, StorageError, StoreResult};
use crate::implementation::order_placement::types::{Order, OrderId, OrderStatus};
use crate::types::catalog::{Address, AddressId, Product, ProductId, User, UserId};
use crate::types::promotion::{PromoCode, PromoCodeId};
use crate::types::store_config::RawConfigRow;

/// Everything the store holds, cloned wholesale for rollback snapshots.
#[derive(Debug, Clone, Default)]
struct StoreState {
    products:    HashMap<ProductId, Product>,
    users:       HashMap<UserId, User>,
    addresses:   HashMap<AddressId, Address>,
    promos:      HashMap<PromoCodeId, PromoCode>,
    orders:      HashMap<OrderId, Order>,
    config_rows: Vec<RawConfigRow>,
}

/// In-memory implementation of the store contract.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, StoreState>> {
        self.state.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Seeds a product.
    pub fn insert_product(&self, product: Product) -> StoreResult<()> {
        self.lock()?.products.insert(product.id.clone(), product);
        Ok(())
    }

    /// Seeds a user.
    pub fn insert_user(&self, user: User) -> StoreResult<()> {
        self.lock()?.users.insert(user.id.clone(), user);
        Ok(())
    }

    /// Seeds an address.
    pub fn insert_address(&self, address: Address) -> StoreResult<()> {
        self.lock()?.addresses.insert(address.id.clone(), address);
        Ok(())
    }

    /// Seeds a promo code.
    pub fn insert_promo(&self, promo: PromoCode) -> StoreResult<()> {
        self.lock()?.promos.insert(promo.id.clone(), promo);
        Ok(())
    }

    /// Replaces the configuration rows.
    pub fn set_config_rows(&self, rows: Vec<RawConfigRow>) -> StoreResult<()> {
        self.lock()?.config_rows = rows;
        Ok(())
    }

    /// Current stock for a product, if it exists.
    pub fn product_stock(&self, id: &ProductId) -> StoreResult<Option<i64>> {
        Ok(self.lock()?.products.get(id).map(|p| p.stock))
    }

    /// Current usage counter for a promo code, if it exists.
    pub fn promo_usage(&self, id: &PromoCodeId) -> StoreResult<Option<u32>> {
        Ok(self.lock()?.promos.get(id).map(|p| p.usage_count))
    }

    /// Number of persisted orders, deleted included.
    pub fn order_count(&self) -> StoreResult<usize> {
        Ok(self.lock()?.orders.len())
    }

    /// Looks up a user by ID.
    pub fn get_user(&self, id: &UserId) -> StoreResult<Option<User>> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    /// Number of stored users.
    pub fn user_count(&self) -> StoreResult<usize> {
        Ok(self.lock()?.users.len())
    }
}

impl CommerceStore for InMemoryStore {
    fn get_config_rows(&self) -> StoreResult<Vec<RawConfigRow>> {
        Ok(self.lock()?.config_rows.clone())
    }

    fn find_product(&self, id: &ProductId) -> StoreResult<Option<Product>> {
        Ok(self.lock()?.products.get(id).cloned())
    }

    fn find_address(&self, id: &AddressId) -> StoreResult<Option<Address>> {
        Ok(self.lock()?.addresses.get(id).cloned())
    }

    fn find_promo(&self, id: &PromoCodeId) -> StoreResult<Option<PromoCode>> {
        Ok(self.lock()?.promos.get(id).cloned())
    }

    fn find_order(&self, id: &OrderId) -> StoreResult<Option<Order>> {
        Ok(self.lock()?.orders.get(id).cloned())
    }

    fn transaction<T>(
        &self, f: &mut dyn FnMut(&mut dyn StoreTx) -> OrderResult<T>,
    ) -> OrderResult<T> {
        let mut guard = self.lock()?;
        let snapshot = guard.clone();
        let result = {
            let mut tx = MemoryTx { state: &mut *guard };
            f(&mut tx)
        };
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                *guard = snapshot;
                Err(err)
            },
        }
    }
}

/// Transaction handle over the locked state.
struct MemoryTx<'a> {
    state: &'a mut StoreState,
}

impl StoreTx for MemoryTx<'_> {
    fn find_product(&self, id: &ProductId) -> StoreResult<Option<Product>> {
        Ok(self.state.products.get(id).cloned())
    }

    fn find_address(&self, id: &AddressId) -> StoreResult<Option<Address>> {
        Ok(self.state.addresses.get(id).cloned())
    }

    fn find_promo(&self, id: &PromoCodeId) -> StoreResult<Option<PromoCode>> {
        Ok(self.state.promos.get(id).cloned())
    }

    fn find_user(&self, id: &UserId) -> StoreResult<Option<User>> {
        Ok(self.state.users.get(id).cloned())
    }

    fn find_user_by_phone(&self, variations: &[String]) -> StoreResult<Option<User>> {
        Ok(self
            .state
            .users
            .values()
            .find(|u| u.phone.as_deref().is_some_and(|p| variations.iter().any(|v| v == p)))
            .cloned())
    }

    fn find_walk_in_user(&self) -> StoreResult<Option<User>> {
        Ok(self.state.users.values().find(|u| u.is_walk_in).cloned())
    }

    fn create_user(&mut self, user: &User) -> StoreResult<()> {
        self.state.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    fn update_user_phone(&mut self, id: &UserId, phone: &str) -> StoreResult<()> {
        let user = self
            .state
            .users
            .get_mut(id)
            .ok_or_else(|| StorageError::RecordMissing(format!("user {}", id)))?;
        user.phone = Some(phone.to_string());
        Ok(())
    }

    fn order_number_exists(&self, number: &str) -> StoreResult<bool> {
        // Scans deleted orders too; numbers are never recycled.
        Ok(self.state.orders.values().any(|o| o.order_number == number))
    }

    fn find_order(&self, id: &OrderId) -> StoreResult<Option<Order>> {
        Ok(self.state.orders.get(id).cloned())
    }

    fn create_order(&mut self, order: &Order) -> StoreResult<()> {
        if self.order_number_exists(&order.order_number)? {
            return Err(StorageError::ConstraintViolation(format!(
                "duplicate order number {}",
                order.order_number
            )));
        }
        self.state.orders.insert(order.id.clone(), order.clone());
        Ok(())
    }

    fn update_order_status(&mut self, id: &OrderId, status: OrderStatus) -> StoreResult<()> {
        let order = self
            .state
            .orders
            .get_mut(id)
            .ok_or_else(|| StorageError::RecordMissing(format!("order {}", id)))?;
        order.status = status;
        order.updated_at = Utc::now();
        Ok(())
    }

    fn soft_delete_order(&mut self, id: &OrderId) -> StoreResult<()> {
        let order = self
            .state
            .orders
            .get_mut(id)
            .ok_or_else(|| StorageError::RecordMissing(format!("order {}", id)))?;
        order.is_deleted = true;
        order.updated_at = Utc::now();
        Ok(())
    }

    fn decrement_stock(&mut self, id: &ProductId, quantity: u32) -> StoreResult<()> {
        let product = self
            .state
            .products
            .get_mut(id)
            .ok_or_else(|| StorageError::RecordMissing(format!("product {}", id)))?;
        let quantity = i64::from(quantity);
        if product.stock < quantity {
            return Err(StorageError::ConstraintViolation(format!(
                "stock would fall below zero for {}",
                product.name
            )));
        }
        product.stock -= quantity;
        product.updated_at = Utc::now();
        Ok(())
    }

    fn increment_promo_usage(&mut self, id: &PromoCodeId) -> StoreResult<()> {
        let promo = self
            .state
            .promos
            .get_mut(id)
            .ok_or_else(|| StorageError::RecordMissing(format!("promo {}", id)))?;
        promo.usage_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::errors::OrderError;

    fn test_product(id: &str, stock: i64) -> Product {
        Product::new(ProductId::new(id), format!("Product {}", id), dec!(5.00), stock)
    }

    #[test]
    fn test_transaction_commit_persists_writes() {
        let store = InMemoryStore::new();
        store.insert_product(test_product("P1", 10)).expect("seed");

        store
            .transaction(&mut |tx| {
                tx.decrement_stock(&ProductId::new("P1"), 4)?;
                Ok(())
            })
            .expect("transaction");

        let stock = store.product_stock(&ProductId::new("P1")).expect("stock");
        assert_eq!(stock, Some(6));
    }

    #[test]
    fn test_transaction_rollback_restores_state() {
        let store = InMemoryStore::new();
        store.insert_product(test_product("P1", 10)).expect("seed");

        let result: OrderResult<()> = store.transaction(&mut |tx| {
            tx.decrement_stock(&ProductId::new("P1"), 4)?;
            Err(OrderError::InvalidTotal)
        });
        assert!(result.is_err());

        let stock = store.product_stock(&ProductId::new("P1")).expect("stock");
        assert_eq!(stock, Some(10));
    }

    #[test]
    fn test_decrement_never_drives_stock_negative() {
        let store = InMemoryStore::new();
        store.insert_product(test_product("P1", 3)).expect("seed");

        let result: OrderResult<()> = store.transaction(&mut |tx| {
            tx.decrement_stock(&ProductId::new("P1"), 5)?;
            Ok(())
        });

        match result {
            Err(OrderError::Storage(StorageError::ConstraintViolation(msg))) => {
                assert!(msg.contains("stock"));
            },
            other => panic!("expected constraint violation, got {:?}", other),
        }
        let stock = store.product_stock(&ProductId::new("P1")).expect("stock");
        assert_eq!(stock, Some(3));
    }
}
