// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::Settings;
use crate::document::{format_money, format_number};
use crate::editor::{ItemUpdate, QuoteEdit, add_item_with, apply, apply_all};
use crate::models::{Quotation, Unit};
use crate::store::QuoteStore;
use crate::utils::{
    coerce_decimal, find_quote, maybe_print_json, parse_dimensions, pretty_table,
    resolve_item_id, short_id, update_quote,
};

pub fn handle(store: &dyn QuoteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(store, sub)?;
        }
        Some(("set", sub)) => set(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Field flags given on the command line, in a fixed order.
pub fn updates_from_matches(sub: &clap::ArgMatches) -> Result<Vec<ItemUpdate>> {
    let mut updates = Vec::new();
    if let Some(v) = sub.get_one::<String>("category") {
        updates.push(ItemUpdate::Category(v.trim().to_string()));
    }
    if let Some(v) = sub.get_one::<String>("name") {
        updates.push(ItemUpdate::Name(v.trim().to_string()));
    }
    if let Some(v) = sub.get_one::<String>("description") {
        updates.push(ItemUpdate::Description(v.trim().to_string()));
    }
    if let Some(v) = sub.get_one::<String>("unit") {
        updates.push(ItemUpdate::Unit(v.parse::<Unit>()?));
    }
    if let Some(v) = sub.get_one::<String>("quantity") {
        updates.push(ItemUpdate::Quantity(coerce_decimal(v)));
    }
    if let Some(v) = sub.get_one::<String>("rate") {
        updates.push(ItemUpdate::Rate(coerce_decimal(v)));
    }
    if let Some(v) = sub.get_one::<String>("dims") {
        updates.push(ItemUpdate::Dimensions(Some(parse_dimensions(v))));
    }
    if matches!(sub.try_get_one::<bool>("clear_dims"), Ok(Some(true))) {
        updates.push(ItemUpdate::Dimensions(None));
    }
    Ok(updates)
}

pub fn item_rows(q: &Quotation, sym: &str) -> Vec<Vec<String>> {
    q.items()
        .iter()
        .enumerate()
        .map(|(idx, i)| {
            vec![
                (idx + 1).to_string(),
                short_id(&i.id),
                i.category.clone(),
                i.name.clone(),
                format_number(i.quantity()),
                i.unit.to_string(),
                format_money(i.rate(), sym),
                format_money(i.amount(), sym),
            ]
        })
        .collect()
}

pub fn add(store: &dyn QuoteStore, sub: &clap::ArgMatches) -> Result<String> {
    let key = sub.get_one::<String>("quote").unwrap();
    let updates = updates_from_matches(sub)?;
    let mut new_id = String::new();
    let q = update_quote(store, key, |q| {
        let (q, id) = add_item_with(q, updates);
        new_id = id;
        Ok(q)
    })?;
    let settings = Settings::load(store)?;
    println!(
        "Added item {} to {} (subtotal {})",
        short_id(&new_id),
        q.number,
        format_money(q.subtotal(), &settings.currency_symbol)
    );
    Ok(new_id)
}

fn set(store: &dyn QuoteStore, sub: &clap::ArgMatches) -> Result<()> {
    let key = sub.get_one::<String>("quote").unwrap();
    let item_key = sub.get_one::<String>("item").unwrap();
    let updates = updates_from_matches(sub)?;
    if updates.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }
    let q = update_quote(store, key, |q| {
        let id = resolve_item_id(&q, item_key)?;
        let edits = updates.into_iter().map(|update| QuoteEdit::UpdateItem {
            id: id.clone(),
            update,
        });
        Ok(apply_all(q, edits))
    })?;
    let settings = Settings::load(store)?;
    println!(
        "Updated item in {} (total {})",
        q.number,
        format_money(q.total(), &settings.currency_symbol)
    );
    Ok(())
}

fn remove(store: &dyn QuoteStore, sub: &clap::ArgMatches) -> Result<()> {
    let key = sub.get_one::<String>("quote").unwrap();
    let item_key = sub.get_one::<String>("item").unwrap();
    let q = update_quote(store, key, |q| {
        let id = resolve_item_id(&q, item_key)?;
        Ok(apply(q, QuoteEdit::RemoveItem(id)))
    })?;
    println!("Removed item from {} ({} left)", q.number, q.items().len());
    Ok(())
}

fn list(store: &dyn QuoteStore, sub: &clap::ArgMatches) -> Result<()> {
    let quotes = store.load()?;
    let q = find_quote(&quotes, sub.get_one::<String>("quote").unwrap())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &q.items())? {
        return Ok(());
    }
    let settings = Settings::load(store)?;
    println!(
        "{}",
        pretty_table(
            &["#", "ID", "Category", "Name", "Qty", "Unit", "Rate", "Amount"],
            item_rows(q, &settings.currency_symbol),
        )
    );
    Ok(())
}
