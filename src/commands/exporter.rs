// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};

use crate::models::Quotation;
use crate::store::QuoteStore;
use crate::utils::find_quote;

pub fn handle(store: &dyn QuoteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("quote", sub)) => export_quote(store, sub),
        Some(("quotes", sub)) => export_all(store, sub),
        _ => Ok(()),
    }
}

fn export_quote(store: &dyn QuoteStore, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    let quotes = store.load()?;
    let q = find_quote(&quotes, sub.get_one::<String>("quote").unwrap())?;

    match fmt.as_str() {
        "csv" => write_csv(q, out)?,
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(q)?)
                .with_context(|| format!("Write {}", out))?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} to {}", q.number, out);
    Ok(())
}

/// One row per item, then the stored totals as labelled rows.
fn write_csv(q: &Quotation, out: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
    wtr.write_record([
        "number",
        "category",
        "name",
        "description",
        "quantity",
        "unit",
        "rate",
        "amount",
    ])?;
    for i in q.items() {
        wtr.write_record([
            q.number.clone(),
            i.category.clone(),
            i.name.clone(),
            i.description.clone(),
            i.quantity().to_string(),
            i.unit.to_string(),
            i.rate().to_string(),
            i.amount().to_string(),
        ])?;
    }
    for (label, value) in [
        ("subtotal", q.subtotal()),
        ("discount", q.discount()),
        ("tax_rate", q.tax_rate()),
        ("tax_amount", q.tax_amount()),
        ("total", q.total()),
    ] {
        wtr.write_record([
            q.number.clone(),
            String::new(),
            label.to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            value.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn export_all(store: &dyn QuoteStore, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap().trim();
    let quotes = store.load()?;
    std::fs::write(out, serde_json::to_string_pretty(&quotes)?)
        .with_context(|| format!("Write {}", out))?;
    println!("Exported {} quotations to {}", quotes.len(), out);
    Ok(())
}
