// ============================================================================
// TESTS
// ============================================================================

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use super::{check_promo, discount_for, validate_promo_by_id};
use crate::errors::{OrderError, PromoRejection};
use crate::storage::InMemoryStore;
use crate::types::promotion::{PromoCode, PromoCodeId};

fn save10() -> PromoCode {
    PromoCode::percentage(PromoCodeId::new("promo-1"), "save10", dec!(10))
}

#[test]
fn test_valid_promo_passes() {
    let promo = save10();
    assert!(check_promo(Some(&promo), dec!(50), Utc::now()).is_ok());
    assert_eq!(promo.code, "SAVE10");
}

#[test]
fn test_missing_promo_rejected() {
    let result = check_promo(None, dec!(50), Utc::now());
    assert_eq!(result, Err(PromoRejection::NotFound));
}

#[test]
fn test_soft_deleted_promo_rejected_as_not_found() {
    let mut promo = save10();
    promo.is_deleted = true;

    let result = check_promo(Some(&promo), dec!(50), Utc::now());
    assert_eq!(result, Err(PromoRejection::NotFound));
}

#[test]
fn test_inactive_promo_rejected() {
    let mut promo = save10();
    promo.is_active = false;

    let result = check_promo(Some(&promo), dec!(50), Utc::now());
    assert_eq!(result, Err(PromoRejection::Inactive));
}

#[test]
fn test_expired_promo_rejected() {
    let promo = save10().with_expiry(Utc::now() - Duration::hours(1));

    let result = check_promo(Some(&promo), dec!(50), Utc::now());
    assert_eq!(result, Err(PromoRejection::Expired));
}

#[test]
fn test_future_expiry_accepted() {
    let promo = save10().with_expiry(Utc::now() + Duration::days(30));
    assert!(check_promo(Some(&promo), dec!(50), Utc::now()).is_ok());
}

#[test]
fn test_usage_limit_reached_rejected() {
    let mut promo = save10().with_usage_limit(100);
    promo.usage_count = 100;

    let result = check_promo(Some(&promo), dec!(50), Utc::now());
    assert_eq!(result, Err(PromoRejection::UsageLimitReached));
}

#[test]
fn test_minimum_subtotal_not_met_rejected() {
    let promo = save10().with_min_subtotal(dec!(40));

    let result = check_promo(Some(&promo), dec!(39.99), Utc::now());
    assert_eq!(
        result,
        Err(PromoRejection::MinimumSubtotalNotMet { required: dec!(40) })
    );
    assert!(check_promo(Some(&promo), dec!(40), Utc::now()).is_ok());
}

#[test]
fn test_first_failing_check_wins() {
    // Inactive and expired: the active check runs first.
    let mut promo = save10().with_expiry(Utc::now() - Duration::hours(1));
    promo.is_active = false;

    let result = check_promo(Some(&promo), dec!(50), Utc::now());
    assert_eq!(result, Err(PromoRejection::Inactive));
}

#[test]
fn test_discount_for_percentage_promo() {
    let promo = save10();
    assert_eq!(discount_for(&promo, dec!(50)), dec!(5));
}

#[test]
fn test_discount_for_flat_promo_clamped() {
    let promo = PromoCode::flat(PromoCodeId::new("promo-2"), "TAKE50", dec!(50));
    assert_eq!(discount_for(&promo, dec!(30)), dec!(30));
}

#[test]
fn test_validate_by_id_reads_store() {
    let store = InMemoryStore::new();
    store.insert_promo(save10()).expect("seed");

    let promo =
        validate_promo_by_id(&store, &PromoCodeId::new("promo-1"), dec!(50)).expect("valid");
    assert_eq!(promo.code, "SAVE10");

    let missing = validate_promo_by_id(&store, &PromoCodeId::new("promo-9"), dec!(50));
    assert!(matches!(
        missing,
        Err(OrderError::PromoRejected(PromoRejection::NotFound))
    ));
}

#[test]
fn test_validation_does_not_mutate_usage() {
    let store = InMemoryStore::new();
    store.insert_promo(save10()).expect("seed");

    validate_promo_by_id(&store, &PromoCodeId::new("promo-1"), dec!(50)).expect("valid");
    let usage = store.promo_usage(&PromoCodeId::new("promo-1")).expect("usage");
    assert_eq!(usage, Some(0));
}
