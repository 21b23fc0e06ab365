// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Print-ready rendering of a stored quotation.
//!
//! Every figure is printed exactly as stored on the quotation; nothing here
//! recomputes amounts or totals.

use rust_decimal::Decimal;
use std::fmt::Write as _;

use crate::config::Settings;
use crate::models::{LineItem, Quotation};
use crate::utils::pretty_table;

const DATE_FMT: &str = "%d %b %Y";

/// Digits grouped the Indian way (`12,34,567.5`), without rounding.
pub fn format_number(value: Decimal) -> String {
    let s = value.normalize().to_string();
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    let mut out = String::from(sign);
    out.push_str(&group_indian(int_part));
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, last3) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), last3)
}

pub fn format_money(value: Decimal, symbol: &str) -> String {
    if value.is_sign_negative() && !value.is_zero() {
        format!("-{}{}", symbol, format_number(value.abs()))
    } else {
        format!("{}{}", symbol, format_number(value.abs()))
    }
}

/// Items grouped by category, groups in order of first appearance.
pub fn group_by_category(items: &[LineItem]) -> Vec<(&str, Vec<&LineItem>)> {
    let mut groups: Vec<(&str, Vec<&LineItem>)> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|(c, _)| *c == item.category) {
            Some((_, members)) => members.push(item),
            None => groups.push((item.category.as_str(), vec![item])),
        }
    }
    groups
}

pub fn document_title(quote: &Quotation) -> &'static str {
    if quote.is_invoice() {
        "TAX INVOICE"
    } else {
        "QUOTATION"
    }
}

fn item_cell(item: &LineItem) -> String {
    let mut cell = item.name.clone();
    if !item.description.trim().is_empty() {
        cell.push('\n');
        cell.push_str(item.description.trim());
    }
    if let Some(d) = item.dimensions.filter(|d| d.is_visible()) {
        let _ = write!(
            cell,
            "\nDims: {} x {} x {}",
            format_number(d.length),
            format_number(d.height),
            format_number(d.depth)
        );
    }
    cell
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn push_total(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<24}{:>20}", label, value);
}

pub fn render(quote: &Quotation, settings: &Settings) -> String {
    let sym = settings.currency_symbol.as_str();
    let mut out = String::new();

    push_line(&mut out, &settings.business_name);
    for line in [
        &settings.business_tagline,
        &settings.business_address,
        &settings.business_email,
    ] {
        if !line.trim().is_empty() {
            push_line(&mut out, line);
        }
    }
    if !settings.business_gstin.trim().is_empty() {
        let _ = writeln!(out, "GSTIN: {}", settings.business_gstin);
    }
    out.push('\n');

    push_line(&mut out, document_title(quote));
    let _ = writeln!(out, "#{}", quote.number);
    if quote.is_invoice() {
        let _ = writeln!(out, "[{}]", quote.status.as_str().to_uppercase());
    }
    out.push('\n');

    push_line(&mut out, "BILL TO");
    let c = &quote.customer;
    for line in [&c.name, &c.address, &c.email, &c.phone] {
        if !line.trim().is_empty() {
            push_line(&mut out, line.trim());
        }
    }
    out.push('\n');

    push_line(&mut out, "DETAILS");
    let date_label = if quote.is_invoice() {
        "Invoice Date:"
    } else {
        "Date:"
    };
    let _ = writeln!(out, "{:<14}{}", date_label, quote.date.format(DATE_FMT));
    if !quote.is_invoice() {
        let _ = writeln!(
            out,
            "{:<14}{}",
            "Valid Until:",
            quote.valid_until.format(DATE_FMT)
        );
    }
    out.push('\n');

    let mut rows = Vec::new();
    for (category, members) in group_by_category(quote.items()) {
        rows.push(vec![
            String::new(),
            category.to_uppercase(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ]);
        for (idx, item) in members.iter().enumerate() {
            rows.push(vec![
                (idx + 1).to_string(),
                item_cell(item),
                format_number(item.quantity()),
                item.unit.to_string(),
                format_money(item.rate(), sym),
                format_money(item.amount(), sym),
            ]);
        }
    }
    let table = pretty_table(&["#", "Description", "Qty", "Unit", "Rate", "Amount"], rows);
    let _ = writeln!(out, "{}", table);
    out.push('\n');

    push_total(&mut out, "Subtotal", &format_money(quote.subtotal(), sym));
    if quote.discount() > Decimal::ZERO {
        push_total(
            &mut out,
            "Discount",
            &format!("-{}", format_money(quote.discount(), sym)),
        );
    }
    push_total(
        &mut out,
        &format!("{} ({}%)", settings.tax_label, format_number(quote.tax_rate())),
        &format_money(quote.tax_amount(), sym),
    );
    push_total(&mut out, "Total", &format_money(quote.total(), sym));

    if !quote.notes.trim().is_empty() {
        out.push('\n');
        push_line(&mut out, "NOTES & TERMS");
        push_line(&mut out, quote.notes.trim_end());
    }

    out.push('\n');
    push_line(&mut out, "Thank you for your business!");
    push_line(&mut out, "Authorized Signature");
    out
}
