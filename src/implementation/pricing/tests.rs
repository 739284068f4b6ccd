// ============================================================================
// TESTS
// ============================================================================

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{
    calculate_discount_amount, calculate_order_charges, calculate_order_total, round_display,
};
use crate::implementation::order_placement::types::{DeliveryType, SaleChannel};
use crate::types::promotion::DiscountType;
use crate::types::store_config::{ChargeConfig, ChargeRate, FlatCharge};

fn config(tax_percent: Decimal, convenience: Decimal, delivery: Decimal) -> ChargeConfig {
    ChargeConfig {
        tax:         ChargeRate { percent: tax_percent, waive: false },
        convenience: FlatCharge { amount: convenience, waive: false },
        delivery:    FlatCharge { amount: delivery, waive: false },
    }
}

#[test]
fn test_totals_formula_with_no_waivers() {
    let config = config(dec!(13), dec!(1.50), dec!(4.99));
    let charges = calculate_order_charges(
        dec!(100),
        &config,
        false,
        DeliveryType::Delivery,
        SaleChannel::Online,
    );
    let totals = calculate_order_total(dec!(100), &charges, dec!(5), dec!(13));

    assert_eq!(totals.tax, dec!(13));
    assert_eq!(totals.convenience_charge, dec!(1.50));
    assert_eq!(totals.delivery_charge, dec!(4.99));
    assert_eq!(
        totals.total,
        dec!(100) + dec!(13) + dec!(1.50) + dec!(4.99) - dec!(5)
    );
}

#[test]
fn test_waived_tax_charges_zero_but_keeps_original() {
    let mut config = config(dec!(13), dec!(0), dec!(0));
    config.tax.waive = true;

    let charges = calculate_order_charges(
        dec!(200),
        &config,
        false,
        DeliveryType::Delivery,
        SaleChannel::Online,
    );

    assert_eq!(charges.tax, dec!(0));
    assert_eq!(charges.original_tax, dec!(26));
    assert!(charges.tax_waived);
}

#[test]
fn test_pickup_zeroes_delivery_and_convenience() {
    let config = config(dec!(13), dec!(1.50), dec!(4.99));

    let charges = calculate_order_charges(
        dec!(100),
        &config,
        false,
        DeliveryType::Pickup,
        SaleChannel::Online,
    );

    assert_eq!(charges.convenience_charge, dec!(0));
    assert_eq!(charges.delivery_charge, dec!(0));
    assert_eq!(charges.original_convenience_charge, dec!(1.50));
    assert_eq!(charges.original_delivery_charge, dec!(4.99));
}

#[test]
fn test_in_store_sale_zeroes_convenience_only() {
    let config = config(dec!(13), dec!(1.50), dec!(4.99));

    let charges = calculate_order_charges(
        dec!(100),
        &config,
        false,
        DeliveryType::Delivery,
        SaleChannel::InStore,
    );

    assert_eq!(charges.convenience_charge, dec!(0));
    assert_eq!(charges.delivery_charge, dec!(4.99));
}

#[test]
fn test_free_delivery_zeroes_delivery_charge() {
    let config = config(dec!(13), dec!(1.50), dec!(4.99));

    let charges = calculate_order_charges(
        dec!(100),
        &config,
        true,
        DeliveryType::Delivery,
        SaleChannel::Online,
    );

    assert_eq!(charges.delivery_charge, dec!(0));
    assert_eq!(charges.original_delivery_charge, dec!(4.99));
}

#[test]
fn test_percentage_discount_capped() {
    // 10% of 100 is 10, capped to 5.
    let discount =
        calculate_discount_amount(dec!(100), DiscountType::Percentage, dec!(10), Some(dec!(5)));
    assert_eq!(discount, dec!(5));
}

#[test]
fn test_percentage_discount_uncapped() {
    let discount = calculate_discount_amount(dec!(50), DiscountType::Percentage, dec!(10), None);
    assert_eq!(discount, dec!(5));
}

#[test]
fn test_flat_discount_clamped_to_subtotal() {
    // A $50 code against a $30 order discounts $30, not $50.
    let discount = calculate_discount_amount(dec!(30), DiscountType::Value, dec!(50), None);
    assert_eq!(discount, dec!(30));
}

#[test]
fn test_total_never_negative() {
    let config = config(dec!(0), dec!(0), dec!(0));
    let charges = calculate_order_charges(
        dec!(20),
        &config,
        false,
        DeliveryType::Pickup,
        SaleChannel::Online,
    );

    // An oversized discount slipping past the first clamp still cannot
    // drive the total negative.
    let totals = calculate_order_total(dec!(20), &charges, dec!(25), dec!(0));
    assert_eq!(totals.total, dec!(0));
}

#[test]
fn test_pickup_end_to_end_pricing() {
    // Cart of 2 x 12.99 at 13% tax, pickup: no convenience, no delivery.
    let config = config(dec!(13), dec!(1.50), dec!(4.99));
    let subtotal = dec!(12.99) * dec!(2);
    assert_eq!(subtotal, dec!(25.98));

    let charges = calculate_order_charges(
        subtotal,
        &config,
        false,
        DeliveryType::Pickup,
        SaleChannel::Online,
    );
    assert_eq!(charges.tax, dec!(3.3774));

    let totals = calculate_order_total(subtotal, &charges, dec!(0), dec!(13));
    assert_eq!(totals.total, dec!(29.3574));
    assert_eq!(round_display(totals.total), dec!(29.36));
}

#[test]
fn test_round_display_half_up() {
    assert_eq!(round_display(dec!(1.005)), dec!(1.01));
    assert_eq!(round_display(dec!(1.004)), dec!(1.00));
}
