//! POS customer resolution.
//!
//! A counter sale may name an existing account, a phone number, or
//! nothing at all. Resolution runs inside the sale transaction so a
//! created customer row never outlives a failed sale.

use tracing::debug;

use super::super::phone::{format_phone_number, phone_variations};
use super::super::types::request_types::PosCustomer;
use crate::errors::{OrderError, OrderResult};
use crate::storage::StoreTx;
use crate::types::catalog::{User, UserId};

/// Resolves the user a POS sale belongs to.
///
/// Priority: an explicitly supplied existing-user ID, then a phone-number
/// lookup (creating a customer row when no format variation matches, and
/// canonicalizing the stored phone when one does), then the shared
/// walk-in sentinel, created once if absent. A sentinel that can neither
/// be found nor created is a configuration error, not a client error.
pub fn resolve_pos_customer(
    tx: &mut dyn StoreTx, customer: Option<&PosCustomer>,
) -> OrderResult<User> {
    if let Some(customer) = customer {
        if let Some(user_id) = customer.user_id.as_deref() {
            if let Some(user) = tx.find_user(&UserId::new(user_id))? {
                return Ok(user);
            }
            debug!(user_id, "supplied POS user id not found, falling back");
        }

        if let Some(phone) = customer.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            return resolve_by_phone(tx, phone, customer.name.as_deref());
        }
    }

    resolve_walk_in(tx)
}

fn resolve_by_phone(
    tx: &mut dyn StoreTx, phone: &str, name: Option<&str>,
) -> OrderResult<User> {
    let canonical = format_phone_number(phone);
    let variations = phone_variations(phone);

    if let Some(mut user) = tx.find_user_by_phone(&variations)? {
        if user.phone.as_deref() != Some(canonical.as_str()) {
            tx.update_user_phone(&user.id, &canonical)?;
            user.phone = Some(canonical);
        }
        return Ok(user);
    }

    let user = User::new(name.unwrap_or("Counter Customer"), Some(canonical));
    tx.create_user(&user)?;
    debug!(user_id = %user.id, "created customer from POS phone lookup");
    Ok(user)
}

fn resolve_walk_in(tx: &mut dyn StoreTx) -> OrderResult<User> {
    if let Some(user) = tx.find_walk_in_user()? {
        return Ok(user);
    }

    let sentinel = User::walk_in();
    tx.create_user(&sentinel)
        .map_err(|_| OrderError::WalkInCustomerNotConfigured)?;
    Ok(sentinel)
}
