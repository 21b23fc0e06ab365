// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moduquote::editor::{ItemUpdate, QuoteEdit, add_item, add_item_with, apply};
use moduquote::models::{DEFAULT_CATEGORY, Dimensions, LineItem, Quotation, Unit};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn blank() -> Quotation {
    let d = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    Quotation::new("q-1", "MQ-2025-0001", d, d, dec!(10), "")
}

#[test]
fn added_item_has_defaults_and_fresh_id() {
    let (q, first) = add_item(blank());
    let (q, second) = add_item(q);
    assert_ne!(first, second);
    assert_eq!(q.items().len(), 2);
    assert_eq!(q.items()[1].id, second);

    let item = q.item(&first).unwrap();
    assert_eq!(item.category, DEFAULT_CATEGORY);
    assert_eq!(item.quantity(), Decimal::ONE);
    assert_eq!(item.unit, Unit::Nos);
    assert_eq!(item.rate(), Decimal::ZERO);
    assert_eq!(item.amount(), Decimal::ZERO);
    assert!(item.dimensions.is_none());
}

#[test]
fn items_keep_insertion_order() {
    let q = ["a", "b", "c"].into_iter().fold(blank(), |q, id| {
        apply(q, QuoteEdit::AddItem(LineItem::with_id(id)))
    });
    let ids: Vec<&str> = q.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn quantity_and_rate_updates_recompute_amount_and_totals() {
    let (q, id) = add_item(blank());
    let q = apply(
        q,
        QuoteEdit::UpdateItem {
            id: id.clone(),
            update: ItemUpdate::Rate(dec!(450)),
        },
    );
    assert_eq!(q.item(&id).unwrap().amount(), dec!(450));
    assert_eq!(q.subtotal(), dec!(450));

    let q = apply(
        q,
        QuoteEdit::UpdateItem {
            id: id.clone(),
            update: ItemUpdate::Quantity(dec!(3)),
        },
    );
    assert_eq!(q.item(&id).unwrap().amount(), dec!(1350));
    assert_eq!(q.subtotal(), dec!(1350));
    assert_eq!(q.tax_amount(), dec!(135));
    assert_eq!(q.total(), dec!(1485));
}

#[test]
fn text_updates_leave_amount_alone() {
    let (q, id) = add_item_with(
        blank(),
        [ItemUpdate::Quantity(dec!(2)), ItemUpdate::Rate(dec!(100))],
    );
    let q = [
        ItemUpdate::Category("Kitchen Base Units".into()),
        ItemUpdate::Name("Sink unit".into()),
        ItemUpdate::Description("BWR ply carcass".into()),
        ItemUpdate::Unit(Unit::Set),
        ItemUpdate::Dimensions(Some(Dimensions::new(dec!(900), dec!(720), dec!(560)))),
    ]
    .into_iter()
    .fold(q, |q, update| {
        apply(
            q,
            QuoteEdit::UpdateItem {
                id: id.clone(),
                update,
            },
        )
    });
    let item = q.item(&id).unwrap();
    assert_eq!(item.category, "Kitchen Base Units");
    assert_eq!(item.name, "Sink unit");
    assert_eq!(item.description, "BWR ply carcass");
    assert_eq!(item.unit, Unit::Set);
    assert_eq!(item.dimensions.unwrap().height, dec!(720));
    assert_eq!(item.amount(), dec!(200));
    assert_eq!(q.subtotal(), dec!(200));
}

#[test]
fn unknown_item_id_is_a_no_op() {
    let (q, _) = add_item_with(blank(), [ItemUpdate::Rate(dec!(75))]);
    let before = q.clone();
    let q = apply(
        q,
        QuoteEdit::UpdateItem {
            id: "missing".into(),
            update: ItemUpdate::Rate(dec!(1)),
        },
    );
    assert_eq!(q, before);
    let q = apply(q, QuoteEdit::RemoveItem("missing".into()));
    assert_eq!(q, before);
}

#[test]
fn removing_last_item_leaves_empty_totals() {
    let (q, id) = add_item_with(
        blank(),
        [ItemUpdate::Quantity(dec!(2)), ItemUpdate::Rate(dec!(300))],
    );
    let q = apply(q, QuoteEdit::SetDiscount(dec!(50)));
    let q = apply(q, QuoteEdit::RemoveItem(id));

    assert!(q.items().is_empty());
    assert_eq!(q.subtotal(), Decimal::ZERO);
    assert_eq!(q.tax_amount(), dec!(-5));
    assert_eq!(q.total(), dec!(-55));
}

#[test]
fn removing_one_item_keeps_the_others() {
    let (q, keep) = add_item_with(blank(), [ItemUpdate::Rate(dec!(100))]);
    let (q, drop) = add_item_with(q, [ItemUpdate::Rate(dec!(900))]);
    assert_eq!(q.subtotal(), dec!(1000));

    let q = apply(q, QuoteEdit::RemoveItem(drop));
    assert_eq!(q.items().len(), 1);
    assert_eq!(q.items()[0].id, keep);
    assert_eq!(q.subtotal(), dec!(100));
    assert_eq!(q.total(), dec!(110));
}

#[test]
fn tax_rate_and_discount_edits_recalculate() {
    let (q, _) = add_item_with(blank(), [ItemUpdate::Rate(dec!(1000))]);
    let q = apply(q, QuoteEdit::SetTaxRate(dec!(18)));
    assert_eq!(q.tax_amount(), dec!(180));
    let q = apply(q, QuoteEdit::SetDiscount(dec!(100)));
    assert_eq!(q.tax_amount(), dec!(162));
    assert_eq!(q.total(), dec!(1062));
}
