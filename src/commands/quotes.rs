// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, Local};
use tracing::info;
use uuid::Uuid;

use crate::commands::items::item_rows;
use crate::config::{DEFAULT_NOTES, Settings};
use crate::document::{format_money, format_number};
use crate::editor::{QuoteEdit, apply_all};
use crate::models::{Quotation, Status};
use crate::store::QuoteStore;
use crate::utils::{
    coerce_decimal, find_quote, maybe_print_json, parse_date, pretty_table, quote_index,
    update_quote,
};

pub fn handle(store: &dyn QuoteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("new", sub)) => {
            create(store, sub)?;
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("show", sub)) => show(store, sub)?,
        Some(("set", sub)) => {
            set(store, sub)?;
        }
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Next `PREFIX-YEAR-NNNN` number after the highest one already issued.
pub fn next_number(quotes: &[Quotation], prefix: &str, year: i32) -> String {
    let stem = format!("{}-{}-", prefix, year);
    let last = quotes
        .iter()
        .filter_map(|q| q.number.strip_prefix(stem.as_str()))
        .filter_map(|seq| seq.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:04}", stem, last.saturating_add(1))
}

fn customer_fields(quote: &mut Quotation, sub: &clap::ArgMatches) {
    let c = &mut quote.customer;
    for (arg, field) in [
        ("customer", &mut c.name),
        ("email", &mut c.email),
        ("phone", &mut c.phone),
        ("address", &mut c.address),
    ] {
        if let Some(v) = sub.get_one::<String>(arg) {
            *field = v.trim().to_string();
        }
    }
    if let Some(notes) = sub.get_one::<String>("notes") {
        quote.notes = notes.replace("\\n", "\n");
    }
}

fn pricing_edits(sub: &clap::ArgMatches) -> Vec<QuoteEdit> {
    let mut edits = Vec::new();
    if let Some(v) = sub.get_one::<String>("discount") {
        edits.push(QuoteEdit::SetDiscount(coerce_decimal(v)));
    }
    if let Some(v) = sub.get_one::<String>("tax_rate") {
        edits.push(QuoteEdit::SetTaxRate(coerce_decimal(v)));
    }
    edits
}

pub fn create(store: &dyn QuoteStore, sub: &clap::ArgMatches) -> Result<Quotation> {
    let settings = Settings::load(store)?;
    let mut quotes = store.load()?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };
    let valid_until = date
        .checked_add_signed(Duration::days(settings.validity_days))
        .context("Validity date out of range")?;
    let number = next_number(&quotes, &settings.number_prefix, date.year());

    let mut quote = Quotation::new(
        Uuid::new_v4().to_string(),
        number,
        date,
        valid_until,
        settings.default_tax_rate,
        DEFAULT_NOTES,
    );
    customer_fields(&mut quote, sub);
    let quote = apply_all(quote, pricing_edits(sub));

    quotes.insert(0, quote.clone());
    store.save(&quotes)?;
    info!(number = %quote.number, id = %quote.id, "created quotation");
    println!("Created {} ({})", quote.number, quote.id);
    Ok(quote)
}

pub fn set(store: &dyn QuoteStore, sub: &clap::ArgMatches) -> Result<Quotation> {
    let key = sub.get_one::<String>("quote").unwrap();
    let updated = update_quote(store, key, |mut q| {
        customer_fields(&mut q, sub);
        if let Some(s) = sub.get_one::<String>("status") {
            q.status = s.parse::<Status>()?;
        }
        if let Some(d) = sub.get_one::<String>("date") {
            q.date = parse_date(d)?;
        }
        if let Some(d) = sub.get_one::<String>("valid_until") {
            q.valid_until = parse_date(d)?;
        }
        Ok(apply_all(q, pricing_edits(sub)))
    })?;
    let settings = Settings::load(store)?;
    println!(
        "Updated {} [{}] total {}",
        updated.number,
        updated.status,
        format_money(updated.total(), &settings.currency_symbol)
    );
    Ok(updated)
}

fn list(store: &dyn QuoteStore, sub: &clap::ArgMatches) -> Result<()> {
    let quotes = store.load()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &quotes)? {
        return Ok(());
    }
    if quotes.is_empty() {
        println!("No quotations yet. Create one with `moduquote quote new`.");
        return Ok(());
    }
    let settings = Settings::load(store)?;
    let rows: Vec<Vec<String>> = quotes
        .iter()
        .map(|q| {
            let customer = if q.customer.name.trim().is_empty() {
                "Untitled Customer".to_string()
            } else {
                q.customer.name.clone()
            };
            vec![
                q.number.clone(),
                q.status.to_string(),
                customer,
                q.date.to_string(),
                q.items().len().to_string(),
                format_money(q.total(), &settings.currency_symbol),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Number", "Status", "Customer", "Date", "Items", "Total"], rows)
    );
    Ok(())
}

fn show(store: &dyn QuoteStore, sub: &clap::ArgMatches) -> Result<()> {
    let quotes = store.load()?;
    let q = find_quote(&quotes, sub.get_one::<String>("quote").unwrap())?;
    if maybe_print_json(sub.get_flag("json"), false, q)? {
        return Ok(());
    }
    let settings = Settings::load(store)?;
    let sym = settings.currency_symbol.as_str();
    let fields = vec![
        vec!["Number".into(), q.number.clone()],
        vec!["Id".into(), q.id.clone()],
        vec!["Status".into(), q.status.to_string()],
        vec!["Date".into(), q.date.to_string()],
        vec!["Valid Until".into(), q.valid_until.to_string()],
        vec!["Customer".into(), q.customer.name.clone()],
        vec!["Email".into(), q.customer.email.clone()],
        vec!["Phone".into(), q.customer.phone.clone()],
        vec!["Address".into(), q.customer.address.clone()],
        vec!["Subtotal".into(), format_money(q.subtotal(), sym)],
        vec!["Discount".into(), format_money(q.discount(), sym)],
        vec![
            format!("{} ({}%)", settings.tax_label, format_number(q.tax_rate())),
            format_money(q.tax_amount(), sym),
        ],
        vec!["Total".into(), format_money(q.total(), sym)],
        vec!["Notes".into(), q.notes.clone()],
    ];
    println!("{}", pretty_table(&["Field", "Value"], fields));
    if !q.items().is_empty() {
        println!(
            "{}",
            pretty_table(
                &["#", "ID", "Category", "Name", "Qty", "Unit", "Rate", "Amount"],
                item_rows(q, sym),
            )
        );
    }
    Ok(())
}

fn remove(store: &dyn QuoteStore, sub: &clap::ArgMatches) -> Result<()> {
    let mut quotes = store.load()?;
    let idx = quote_index(&quotes, sub.get_one::<String>("quote").unwrap())?;
    let removed = quotes.remove(idx);
    store.save(&quotes)?;
    info!(number = %removed.number, "deleted quotation");
    println!("Removed quotation {}", removed.number);
    Ok(())
}
