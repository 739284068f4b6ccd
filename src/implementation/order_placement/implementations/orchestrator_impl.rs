//! Order placement orchestration.
//!
//! Business logic implementations for the OrderPlacementService type.
//!
//! A placement attempt moves through input validation and pure pricing
//! outside the transaction, then a single atomic transaction that
//! re-validates every line item against live product state, allocates the
//! order number, persists the order, decrements stock, and records promo
//! usage. Any failure rolls the whole attempt back; no partial order is
//! ever observable.

use chrono::{Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::super::order_number::generate_unique_order_number;
use super::super::types::basic_types::{
    DeliveryType, OrderId, OrderStatus, PaymentMethod, SaleChannel,
};
use super::super::types::main_order_types::{Order, OrderItem};
use super::super::types::request_types::{
    CreateOrderRequest, PosCustomer, PosSaleReceipt, PosSaleRequest,
};
use super::super::types::service_types::OrderPlacementService;
use super::customer_impl::resolve_pos_customer;
use crate::errors::{OrderError, OrderResult};
use crate::implementation::delivery::{is_delivery_available, is_free_delivery_eligible};
use crate::implementation::pricing::{
    calculate_order_charges, calculate_order_total, OrderTotals,
};
use crate::implementation::promotion::{check_promo, discount_for, validate_promo_by_id};
use crate::implementation::store_config::{
    parse_charge_config, parse_free_delivery_config, parse_pickup_location,
};
use crate::storage::CommerceStore;
use crate::types::catalog::{AddressId, ProductId, UserId};
use crate::types::promotion::{PromoCode, PromoCodeId};

/// One priced line awaiting the transactional re-check.
struct PricedLine {
    product_id: ProductId,
    quantity:   u32,
    unit_price: Decimal,
}

/// Who the order belongs to.
enum OrderCustomer {
    /// An authenticated storefront user.
    Known(UserId),
    /// A POS sale; resolved inside the transaction.
    PointOfSale(Option<PosCustomer>),
}

/// Everything the transactional step needs to persist an order.
struct OrderDraft {
    customer:       OrderCustomer,
    address_id:     Option<AddressId>,
    lines:          Vec<PricedLine>,
    totals:         OrderTotals,
    promo:          Option<PromoCode>,
    delivery_type:  DeliveryType,
    payment_method: PaymentMethod,
    delivery_date:  Option<NaiveDate>,
    status:         OrderStatus,
}

impl<S: CommerceStore> OrderPlacementService<S> {
    /// Places an online order.
    pub fn create_order(&self, request: &CreateOrderRequest) -> OrderResult<Order> {
        if request.items.is_empty() {
            return Err(OrderError::NoItems);
        }
        for item in &request.items {
            if item.quantity == 0 {
                return Err(OrderError::InvalidQuantity(item.product_id.clone()));
            }
        }

        // Day-granularity check against the caller's local today.
        if request.order_type == DeliveryType::Delivery {
            let date = request.delivery_date.ok_or(OrderError::DeliveryDateRequired)?;
            if date < Local::now().date_naive() {
                return Err(OrderError::DeliveryDateInPast);
            }
        }

        // Pre-transaction reads: the config snapshot, then the delivery
        // or pickup context.
        let rows = self.store.get_config_rows()?;
        let charge_config = parse_charge_config(&rows)?;
        let free_delivery = parse_free_delivery_config(&rows)?;

        let mut address_id = None;
        let mut is_free = false;
        match request.order_type {
            DeliveryType::Pickup => {
                parse_pickup_location(&rows)?.ok_or(OrderError::PickupLocationNotConfigured)?;
            },
            DeliveryType::Delivery => {
                let id = request.address_id.as_deref().ok_or(OrderError::AddressNotFound)?;
                let id = AddressId::new(id);
                let address =
                    self.store.find_address(&id)?.ok_or(OrderError::AddressNotFound)?;
                let date = request.delivery_date.ok_or(OrderError::DeliveryDateRequired)?;
                if !is_delivery_available(date, &address.city, &free_delivery) {
                    return Err(OrderError::DeliveryNotAvailable { city: address.city, date });
                }
                is_free = is_free_delivery_eligible(
                    date,
                    &address.city,
                    DeliveryType::Delivery,
                    &free_delivery,
                );
                address_id = Some(id);
            },
        }

        // Pricing is pure; stock and price integrity are re-checked
        // inside the transaction.
        let subtotal = line_subtotal(request.items.iter().map(|i| (i.price, i.quantity)));
        let charges = calculate_order_charges(
            subtotal,
            &charge_config,
            is_free,
            request.order_type,
            SaleChannel::Online,
        );
        let (promo, discount) = self.price_promo(request.promo_code_id.as_deref(), subtotal)?;
        let totals = calculate_order_total(subtotal, &charges, discount, charge_config.tax.percent);
        if totals.total <= Decimal::ZERO {
            return Err(OrderError::InvalidTotal);
        }

        let draft = OrderDraft {
            customer: OrderCustomer::Known(UserId::new(request.user_id.clone())),
            address_id,
            lines: request
                .items
                .iter()
                .map(|i| PricedLine {
                    product_id: ProductId::new(i.product_id.clone()),
                    quantity:   i.quantity,
                    unit_price: i.price,
                })
                .collect(),
            totals,
            promo,
            delivery_type: request.order_type,
            payment_method: request.payment_method,
            delivery_date: request.delivery_date,
            status: OrderStatus::Pending,
        };
        self.commit_order(&draft)
    }

    /// Processes a walk-in POS sale.
    ///
    /// Shares the pricing/stock/promo core with [`Self::create_order`];
    /// totals are recomputed server-side, so the POS screen's figures are
    /// advisory. The created order is confirmed immediately since payment
    /// is taken at the counter.
    pub fn pos_sale(&self, request: &PosSaleRequest) -> OrderResult<PosSaleReceipt> {
        if request.items.is_empty() {
            return Err(OrderError::NoItems);
        }
        for item in &request.items {
            if item.quantity == 0 {
                return Err(OrderError::InvalidQuantity(item.name.clone()));
            }
        }
        if !request.payment_method.is_allowed_in_store() {
            return Err(OrderError::InvalidPaymentMethod(
                request.payment_method.display_name().to_string(),
            ));
        }
        if request.total <= Decimal::ZERO {
            return Err(OrderError::InvalidTotal);
        }

        let rows = self.store.get_config_rows()?;
        let charge_config = parse_charge_config(&rows)?;

        let subtotal = line_subtotal(request.items.iter().map(|i| (i.price, i.quantity)));
        let charges = calculate_order_charges(
            subtotal,
            &charge_config,
            false,
            DeliveryType::Pickup,
            SaleChannel::InStore,
        );
        let (promo, discount) = self.price_promo(request.promo_code_id.as_deref(), subtotal)?;
        let totals = calculate_order_total(subtotal, &charges, discount, charge_config.tax.percent);
        if totals.total <= Decimal::ZERO {
            return Err(OrderError::InvalidTotal);
        }

        let draft = OrderDraft {
            customer: OrderCustomer::PointOfSale(request.customer.clone()),
            address_id: None,
            lines: request
                .items
                .iter()
                .map(|i| PricedLine {
                    product_id: ProductId::new(i.id.clone()),
                    quantity:   i.quantity,
                    unit_price: i.price,
                })
                .collect(),
            totals,
            promo,
            delivery_type: DeliveryType::Pickup,
            payment_method: request.payment_method,
            delivery_date: None,
            status: OrderStatus::Confirmed,
        };
        let order = self.commit_order(&draft)?;

        Ok(PosSaleReceipt {
            order_id:       order.id.to_string(),
            order_number:   order.order_number,
            total:          order.total,
            payment_method: order.payment_method,
            timestamp:      order.created_at,
        })
    }

    /// Moves an order along the status workflow.
    pub fn update_order_status(
        &self, order_id: &OrderId, next: OrderStatus,
    ) -> OrderResult<Order> {
        self.store.transaction(&mut |tx| {
            let mut order = tx
                .find_order(order_id)?
                .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;
            if !order.status.can_transition_to(next) {
                return Err(OrderError::InvalidStatusTransition {
                    from: order.status.display_name(),
                    to:   next.display_name(),
                });
            }
            tx.update_order_status(order_id, next)?;
            order.status = next;
            order.updated_at = Utc::now();
            debug!(
                order_number = %order.order_number,
                status = next.display_name(),
                "order status updated"
            );
            Ok(order)
        })
    }

    /// Cancels a cancellable order.
    ///
    /// Cancellation is a status transition only: stock is not restored
    /// and promo usage is not decremented.
    pub fn cancel_order(&self, order_id: &OrderId) -> OrderResult<Order> {
        self.update_order_status(order_id, OrderStatus::Cancelled)
    }

    /// Soft-deletes an order. Its number stays reserved.
    pub fn soft_delete_order(&self, order_id: &OrderId) -> OrderResult<()> {
        self.store.transaction(&mut |tx| {
            if tx.find_order(order_id)?.is_none() {
                return Err(OrderError::OrderNotFound(order_id.to_string()));
            }
            tx.soft_delete_order(order_id)?;
            Ok(())
        })
    }

    /// Pre-flight promo validation and discount computation.
    fn price_promo(
        &self, promo_code_id: Option<&str>, subtotal: Decimal,
    ) -> OrderResult<(Option<PromoCode>, Decimal)> {
        match promo_code_id {
            Some(id) => {
                let promo = validate_promo_by_id(&self.store, &PromoCodeId::new(id), subtotal)?;
                let discount = discount_for(&promo, subtotal);
                Ok((Some(promo), discount))
            },
            None => Ok((None, Decimal::ZERO)),
        }
    }

    /// The transactional step shared by both placement paths.
    fn commit_order(&self, draft: &OrderDraft) -> OrderResult<Order> {
        let mut rng = rand::thread_rng();
        self.store.transaction(&mut |tx| {
            let user_id = match &draft.customer {
                OrderCustomer::Known(id) => id.clone(),
                OrderCustomer::PointOfSale(customer) => {
                    resolve_pos_customer(tx, customer.as_ref())?.id
                },
            };

            // The only race-safe validation: live product state, read
            // fresh on this transaction, immediately before the
            // decrement.
            let mut items = Vec::with_capacity(draft.lines.len());
            for line in &draft.lines {
                let product = tx
                    .find_product(&line.product_id)?
                    .filter(|p| p.is_purchasable())
                    .ok_or_else(|| {
                        OrderError::ProductUnavailable(line.product_id.to_string())
                    })?;
                if !product.has_stock(line.quantity) {
                    return Err(OrderError::InsufficientStock {
                        product:   product.name,
                        available: product.stock,
                        requested: line.quantity,
                    });
                }
                if product.price != line.unit_price {
                    return Err(OrderError::PriceMismatch { product: product.name });
                }
                items.push(OrderItem {
                    product_id:   line.product_id.clone(),
                    product_name: product.name,
                    quantity:     line.quantity,
                    unit_price:   line.unit_price,
                });
            }

            let order_number =
                generate_unique_order_number(&mut rng, |n| tx.order_number_exists(n))?;

            let now = Utc::now();
            let order = Order {
                id: OrderId::generate(),
                order_number,
                user_id,
                address_id: draft.address_id.clone(),
                items,
                subtotal: draft.totals.subtotal,
                tax: draft.totals.tax,
                tax_rate: draft.totals.tax_rate,
                convenience_charge: draft.totals.convenience_charge,
                delivery_charge: draft.totals.delivery_charge,
                discount: draft.totals.discount,
                total: draft.totals.total,
                status: draft.status,
                delivery_type: draft.delivery_type,
                payment_method: draft.payment_method,
                delivery_date: draft.delivery_date,
                promo_code_id: draft.promo.as_ref().map(|p| p.id.clone()),
                is_deleted: false,
                created_at: now,
                updated_at: now,
            };
            tx.create_order(&order)?;

            for item in &order.items {
                tx.decrement_stock(&item.product_id, item.quantity)?;
            }

            if let Some(promo) = &draft.promo {
                if draft.totals.discount > Decimal::ZERO {
                    // The pre-flight check read a possibly stale usage
                    // count; re-check on this transaction before
                    // recording the usage.
                    let live = tx.find_promo(&promo.id)?;
                    check_promo(live.as_ref(), draft.totals.subtotal, Utc::now())?;
                    tx.increment_promo_usage(&promo.id)?;
                }
            }

            info!(
                order_number = %order.order_number,
                total = %order.total,
                "order created"
            );
            Ok(order)
        })
    }
}

fn line_subtotal(lines: impl Iterator<Item = (Decimal, u32)>) -> Decimal {
    lines.map(|(price, quantity)| price * Decimal::from(quantity)).sum()
}
