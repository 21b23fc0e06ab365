// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moduquote::editor::{ItemUpdate, QuoteEdit, add_item_with, apply, apply_all};
use moduquote::models::Quotation;
use moduquote::pricing::{recalculate, totals_for};
use moduquote::utils::coerce_decimal;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn blank(tax_rate: Decimal) -> Quotation {
    let d = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
    Quotation::new("q-1", "MQ-2025-0001", d, d, tax_rate, "")
}

fn with_items(tax_rate: Decimal, lines: &[(Decimal, Decimal)]) -> Quotation {
    lines.iter().fold(blank(tax_rate), |q, (qty, rate)| {
        add_item_with(q, [ItemUpdate::Quantity(*qty), ItemUpdate::Rate(*rate)]).0
    })
}

#[test]
fn new_quotation_starts_at_zero() {
    let q = blank(dec!(10));
    assert!(q.items().is_empty());
    assert_eq!(q.subtotal(), Decimal::ZERO);
    assert_eq!(q.tax_amount(), Decimal::ZERO);
    assert_eq!(q.total(), Decimal::ZERO);
}

#[test]
fn two_items_with_discount_and_tax() {
    let q = with_items(dec!(10), &[(dec!(2), dec!(500)), (dec!(1), dec!(1500))]);
    let q = apply(q, QuoteEdit::SetDiscount(dec!(200)));

    let amounts: Vec<Decimal> = q.items().iter().map(|i| i.amount()).collect();
    assert_eq!(amounts, vec![dec!(1000), dec!(1500)]);
    assert_eq!(q.subtotal(), dec!(2500));
    assert_eq!(q.tax_amount(), dec!(230));
    assert_eq!(q.total(), dec!(2530));
}

#[test]
fn zero_rate_item_yields_zero_totals() {
    let q = with_items(dec!(10), &[(dec!(3), dec!(0))]);
    assert_eq!(q.items()[0].amount(), Decimal::ZERO);
    assert_eq!(q.subtotal(), Decimal::ZERO);
    assert_eq!(q.tax_amount(), Decimal::ZERO);
    assert_eq!(q.total(), Decimal::ZERO);
}

#[test]
fn discount_larger_than_subtotal_is_not_clamped() {
    let q = with_items(dec!(10), &[(dec!(1), dec!(500))]);
    let q = apply(q, QuoteEdit::SetDiscount(dec!(1000)));
    assert_eq!(q.subtotal(), dec!(500));
    assert_eq!(q.tax_amount(), dec!(-50));
    assert_eq!(q.total(), dec!(-550));
}

#[test]
fn non_numeric_tax_rate_is_treated_as_zero() {
    let q = with_items(dec!(10), &[(dec!(4), dec!(250))]);
    let q = apply_all(
        q,
        [
            QuoteEdit::SetDiscount(dec!(100)),
            QuoteEdit::SetTaxRate(coerce_decimal("abc")),
        ],
    );
    assert_eq!(q.tax_rate(), Decimal::ZERO);
    assert_eq!(q.tax_amount(), Decimal::ZERO);
    assert_eq!(q.total(), dec!(900));
}

#[test]
fn recalculate_is_idempotent() {
    let q = with_items(
        dec!(18),
        &[(dec!(2.5), dec!(1234.56)), (dec!(7), dec!(89.1)), (dec!(1), dec!(0.01))],
    );
    let q = apply(q, QuoteEdit::SetDiscount(dec!(33.33)));
    let once = recalculate(q.clone());
    let twice = recalculate(once.clone());
    assert_eq!(once, q);
    assert_eq!(twice, once);
}

#[test]
fn derived_fields_follow_the_formulas() {
    let cases: Vec<(Decimal, Decimal, Vec<(Decimal, Decimal)>)> = vec![
        (dec!(0), dec!(0), vec![]),
        (dec!(5), dec!(12.5), vec![(dec!(1), dec!(99.99))]),
        (dec!(28), dec!(0), vec![(dec!(3), dec!(450)), (dec!(0.5), dec!(80))]),
        (dec!(12.5), dec!(10000), vec![(dec!(10), dec!(75)), (dec!(2), dec!(2))]),
        (dec!(100), dec!(1), vec![(dec!(1), dec!(1)); 6]),
    ];
    for (tax_rate, discount, lines) in cases {
        let q = apply(with_items(tax_rate, &lines), QuoteEdit::SetDiscount(discount));
        let sum: Decimal = q.items().iter().map(|i| i.amount()).sum();
        assert_eq!(q.subtotal(), sum);
        assert_eq!(
            q.tax_amount(),
            (q.subtotal() - discount) * tax_rate / dec!(100)
        );
        assert_eq!(q.total(), q.subtotal() - discount + q.tax_amount());
        for item in q.items() {
            assert_eq!(item.amount(), item.quantity() * item.rate());
        }
    }
}

#[test]
fn totals_for_trusts_stored_amounts() {
    let q = with_items(dec!(10), &[(dec!(2), dec!(50))]);
    let t = totals_for(q.items(), dec!(0), dec!(0));
    assert_eq!(t.subtotal(), dec!(100));
    assert_eq!(t.tax_amount(), Decimal::ZERO);
    assert_eq!(t.total(), dec!(100));
}

#[test]
fn huge_values_saturate_instead_of_panicking() {
    let q = with_items(dec!(10), &[(Decimal::MAX, Decimal::MAX), (Decimal::MAX, dec!(1))]);
    assert_eq!(q.items()[0].amount(), Decimal::MAX);
    assert_eq!(q.subtotal(), Decimal::MAX);
}
