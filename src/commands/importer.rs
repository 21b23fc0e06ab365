// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::info;

use crate::editor::{ItemUpdate, add_item_with};
use crate::models::{Dimensions, Unit};
use crate::store::QuoteStore;
use crate::utils::{coerce_decimal, update_quote};

pub fn handle(store: &dyn QuoteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("items", sub)) => import_items(store, sub).map(|_| ()),
        _ => Ok(()),
    }
}

#[derive(Debug, Deserialize)]
struct ItemRow {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    quantity: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    rate: Option<String>,
    #[serde(default)]
    length: Option<String>,
    #[serde(default)]
    height: Option<String>,
    #[serde(default)]
    depth: Option<String>,
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ItemRow {
    fn into_updates(self) -> Result<Vec<ItemUpdate>> {
        let mut updates = Vec::new();
        if let Some(c) = non_empty(&self.category) {
            updates.push(ItemUpdate::Category(c.to_string()));
        }
        if let Some(n) = non_empty(&self.name) {
            updates.push(ItemUpdate::Name(n.to_string()));
        }
        if let Some(d) = non_empty(&self.description) {
            updates.push(ItemUpdate::Description(d.to_string()));
        }
        if let Some(u) = non_empty(&self.unit) {
            updates.push(ItemUpdate::Unit(u.parse::<Unit>()?));
        }
        if let Some(q) = non_empty(&self.quantity) {
            updates.push(ItemUpdate::Quantity(coerce_decimal(q)));
        }
        if let Some(r) = non_empty(&self.rate) {
            updates.push(ItemUpdate::Rate(coerce_decimal(r)));
        }
        let dims = [&self.length, &self.height, &self.depth].map(non_empty);
        if dims.iter().any(Option::is_some) {
            let [l, h, d] = dims.map(|v| v.map(coerce_decimal).unwrap_or_default());
            updates.push(ItemUpdate::Dimensions(Some(Dimensions::new(l, h, d))));
        }
        Ok(updates)
    }
}

/// Append every CSV row as a new item; returns how many were added.
pub fn import_items(store: &dyn QuoteStore, sub: &clap::ArgMatches) -> Result<usize> {
    let key = sub.get_one::<String>("quote").unwrap().trim();
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let mut batches = Vec::new();
    for (idx, result) in rdr.deserialize::<ItemRow>().enumerate() {
        let row = result.with_context(|| format!("Read CSV row {}", idx + 2))?;
        let updates = row
            .into_updates()
            .with_context(|| format!("Invalid item on CSV row {}", idx + 2))?;
        batches.push(updates);
    }

    let count = batches.len();
    let q = update_quote(store, key, |q| {
        Ok(batches
            .into_iter()
            .fold(q, |q, updates| add_item_with(q, updates).0))
    })?;
    info!(number = %q.number, count, "imported items");
    println!("Imported {} items into {}", count, q.number);
    Ok(count)
}
