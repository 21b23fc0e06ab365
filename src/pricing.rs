// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recalculation engine.
//!
//! `amount` on each line is kept current by the item setters; this module
//! only folds those amounts into `subtotal`, `taxAmount` and `total`. No
//! clamping is done: a discount larger than the subtotal yields a negative
//! tax amount and total. Saturating arithmetic keeps every call total.

use rust_decimal::Decimal;

use crate::models::{LineItem, Quotation, Totals};

pub fn line_amount(quantity: Decimal, rate: Decimal) -> Decimal {
    quantity.saturating_mul(rate)
}

/// Derive totals from already-priced lines, a flat discount and a tax percentage.
pub fn totals_for(items: &[LineItem], discount: Decimal, tax_rate: Decimal) -> Totals {
    let subtotal = items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.amount()));
    let taxable = subtotal.saturating_sub(discount);
    let tax_amount = taxable.saturating_mul(tax_rate / Decimal::ONE_HUNDRED);
    let total = taxable.saturating_add(tax_amount);
    Totals {
        subtotal,
        tax_amount,
        total,
    }
}

/// Returns `quote` with its totals recomputed; every other field is untouched.
pub fn recalculate(mut quote: Quotation) -> Quotation {
    let totals = totals_for(quote.items(), quote.discount(), quote.tax_rate());
    quote.set_totals(totals);
    quote
}
