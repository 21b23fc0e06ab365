// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{Dimensions, LineItem, Quotation, Unit};
use crate::pricing::recalculate;

/// One field of a line item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemUpdate {
    Category(String),
    Name(String),
    Description(String),
    Dimensions(Option<Dimensions>),
    Quantity(Decimal),
    Unit(Unit),
    Rate(Decimal),
}

impl ItemUpdate {
    fn apply_to(self, item: &mut LineItem) {
        match self {
            ItemUpdate::Category(v) => item.category = v,
            ItemUpdate::Name(v) => item.name = v,
            ItemUpdate::Description(v) => item.description = v,
            ItemUpdate::Dimensions(v) => item.dimensions = v,
            ItemUpdate::Quantity(v) => item.set_quantity(v),
            ItemUpdate::Unit(v) => item.unit = v,
            ItemUpdate::Rate(v) => item.set_rate(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuoteEdit {
    AddItem(LineItem),
    UpdateItem { id: String, update: ItemUpdate },
    RemoveItem(String),
    SetDiscount(Decimal),
    SetTaxRate(Decimal),
}

/// Apply one edit and return the recalculated snapshot.
///
/// Updating or removing an unknown item id leaves the items unchanged.
pub fn apply(mut quote: Quotation, edit: QuoteEdit) -> Quotation {
    match edit {
        QuoteEdit::AddItem(item) => {
            debug!(quote = %quote.number, item = %item.id, "add item");
            quote.items_mut().push(item);
        }
        QuoteEdit::UpdateItem { id, update } => {
            if let Some(item) = quote.items_mut().iter_mut().find(|i| i.id == id) {
                update.apply_to(item);
            } else {
                debug!(item = %id, "update skipped, no such item");
            }
        }
        QuoteEdit::RemoveItem(id) => {
            quote.items_mut().retain(|i| i.id != id);
        }
        QuoteEdit::SetDiscount(v) => quote.set_discount(v),
        QuoteEdit::SetTaxRate(v) => quote.set_tax_rate(v),
    }
    recalculate(quote)
}

pub fn apply_all<I>(quote: Quotation, edits: I) -> Quotation
where
    I: IntoIterator<Item = QuoteEdit>,
{
    edits.into_iter().fold(quote, apply)
}

/// Append a blank item; returns the new snapshot and the item's id.
pub fn add_item(quote: Quotation) -> (Quotation, String) {
    let item = LineItem::new();
    let id = item.id.clone();
    (apply(quote, QuoteEdit::AddItem(item)), id)
}

/// Append an item and fill it in with `updates`, as one edit sequence.
pub fn add_item_with<I>(quote: Quotation, updates: I) -> (Quotation, String)
where
    I: IntoIterator<Item = ItemUpdate>,
{
    let (quote, id) = add_item(quote);
    let edits = updates.into_iter().map(|update| QuoteEdit::UpdateItem {
        id: id.clone(),
        update,
    });
    (apply_all(quote, edits), id)
}
