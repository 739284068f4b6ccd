//! Order number allocation.
//!
//! Numbers are short, human-readable, and globally unique across deleted
//! and live orders. Allocation draws random candidates and probes for
//! collisions inside the enclosing transaction; the store's uniqueness
//! constraint remains the final backstop.

use rand::Rng;

use crate::errors::{OrderError, OrderResult, StoreResult};

/// Alphabet order numbers are drawn from.
pub const ORDER_NUMBER_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of an order number.
pub const ORDER_NUMBER_LENGTH: usize = 5;

/// Candidate draws before allocation gives up.
pub const MAX_ALLOCATION_ATTEMPTS: u32 = 20;

/// Draws one random candidate number.
#[must_use]
pub fn random_order_number(rng: &mut impl Rng) -> String {
    (0..ORDER_NUMBER_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..ORDER_NUMBER_ALPHABET.len());
            ORDER_NUMBER_ALPHABET[idx] as char
        })
        .collect()
}

/// Allocates a unique order number.
///
/// `exists` probes the transaction handle, so the check-then-use pattern
/// is safe: the order is created with the returned number before the
/// transaction commits. Exhausting the attempt budget aborts the whole
/// placement attempt; with a 36^5 space this signals an operational
/// problem, not bad luck.
pub fn generate_unique_order_number(
    rng: &mut impl Rng, mut exists: impl FnMut(&str) -> StoreResult<bool>,
) -> OrderResult<String> {
    for _ in 0..MAX_ALLOCATION_ATTEMPTS {
        let candidate = random_order_number(rng);
        if !exists(&candidate)? {
            return Ok(candidate);
        }
    }
    tracing::warn!(
        attempts = MAX_ALLOCATION_ATTEMPTS,
        "order number allocation budget exhausted"
    );
    Err(OrderError::OrderNumberExhausted)
}
