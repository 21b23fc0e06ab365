// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::models::Quotation;
use crate::pricing::{line_amount, totals_for};
use crate::store::QuoteStore;
use crate::utils::pretty_table;

pub fn handle(store: &dyn QuoteStore) -> Result<()> {
    let quotes = store.load()?;
    let rows: Vec<Vec<String>> = audit(&quotes)
        .into_iter()
        .map(|(issue, detail)| vec![issue.to_string(), detail])
        .collect();

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Stored values that disagree with what the pricing rules would derive,
/// plus a few data problems worth a look.
pub fn audit(quotes: &[Quotation]) -> Vec<(&'static str, String)> {
    let mut issues = Vec::new();
    let mut numbers = HashSet::new();

    for q in quotes {
        // 1) Duplicate quotation numbers
        if !numbers.insert(q.number.to_lowercase()) {
            issues.push(("duplicate_number", q.number.clone()));
        }

        // 2) Line amounts that drifted from quantity x rate
        let mut item_ids = HashSet::new();
        for (idx, item) in q.items().iter().enumerate() {
            if !item_ids.insert(item.id.as_str()) {
                issues.push(("duplicate_item_id", format!("{} {}", q.number, item.id)));
            }
            let expected = line_amount(item.quantity(), item.rate());
            if item.amount() != expected {
                issues.push((
                    "item_amount_mismatch",
                    format!(
                        "{} item #{}: stored {} expected {}",
                        q.number,
                        idx + 1,
                        item.amount(),
                        expected
                    ),
                ));
            }
            if item.quantity() < Decimal::ZERO || item.rate() < Decimal::ZERO {
                issues.push((
                    "negative_item_value",
                    format!("{} item #{}", q.number, idx + 1),
                ));
            }
            if let Some(d) = item.dimensions {
                if [d.length, d.height, d.depth].iter().any(|v| *v < Decimal::ZERO) {
                    issues.push((
                        "negative_dimension",
                        format!(
                            "{} item #{}: {} x {} x {}",
                            q.number,
                            idx + 1,
                            d.length,
                            d.height,
                            d.depth
                        ),
                    ));
                }
            }
        }

        // 3) Totals that drifted from the items
        let expected = totals_for(q.items(), q.discount(), q.tax_rate());
        if &expected != q.totals() {
            issues.push((
                "totals_mismatch",
                format!(
                    "{}: stored total {} expected {}",
                    q.number,
                    q.total(),
                    expected.total()
                ),
            ));
        }

        // 4) Allowed, but usually a typo
        if q.discount() > q.subtotal() {
            issues.push((
                "discount_exceeds_subtotal",
                format!("{}: discount {} > subtotal {}", q.number, q.discount(), q.subtotal()),
            ));
        }
        if q.valid_until < q.date {
            issues.push((
                "validity_before_issue_date",
                format!("{}: {} < {}", q.number, q.valid_until, q.date),
            ));
        }
    }
    issues
}
