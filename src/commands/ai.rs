// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Settings;
use crate::editor::{ItemUpdate, QuoteEdit, apply};
use crate::genai::{TextGenerator, enhance_item_description, generate_cover_letter};
use crate::store::QuoteStore;
use crate::utils::{find_quote, resolve_item_id, update_quote};

pub fn handle(
    store: &dyn QuoteStore,
    generator: &dyn TextGenerator,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("cover-letter", sub)) => {
            cover_letter(store, generator, sub)?;
        }
        Some(("describe", sub)) => {
            describe(store, generator, sub)?;
        }
        _ => {}
    }
    Ok(())
}

pub fn cover_letter(
    store: &dyn QuoteStore,
    generator: &dyn TextGenerator,
    sub: &clap::ArgMatches,
) -> Result<String> {
    let quotes = store.load()?;
    let q = find_quote(&quotes, sub.get_one::<String>("quote").unwrap())?;
    let settings = Settings::load(store)?;
    let letter = generate_cover_letter(generator, q, &settings.currency_symbol);
    match sub.get_one::<String>("out") {
        Some(out) => {
            let out = out.trim();
            std::fs::write(out, &letter).with_context(|| format!("Write {}", out))?;
            println!("Cover letter for {} written to {}", q.number, out);
        }
        None => println!("{}", letter),
    }
    Ok(letter)
}

/// Generate a description for one item and, unless `--dry-run`, store it.
/// An empty result leaves the item as it was.
pub fn describe(
    store: &dyn QuoteStore,
    generator: &dyn TextGenerator,
    sub: &clap::ArgMatches,
) -> Result<String> {
    let key = sub.get_one::<String>("quote").unwrap();
    let item_key = sub.get_one::<String>("item").unwrap();
    let quotes = store.load()?;
    let q = find_quote(&quotes, key)?;
    let id = resolve_item_id(q, item_key)?;
    let Some(item) = q.item(&id) else {
        return Ok(String::new());
    };

    if item.name.trim().is_empty() {
        println!("Item has no name; give it one before asking for a description.");
        return Ok(String::new());
    }
    let text = enhance_item_description(generator, &item.name, &item.category);
    if text.is_empty() {
        println!("No description generated; item left unchanged.");
        return Ok(text);
    }
    println!("{}", text);
    if sub.get_flag("dry_run") {
        return Ok(text);
    }

    let number = q.number.clone();
    update_quote(store, &number, |q| {
        Ok(apply(
            q,
            QuoteEdit::UpdateItem {
                id,
                update: ItemUpdate::Description(text.clone()),
            },
        ))
    })?;
    info!(number = %number, "stored generated description");
    Ok(text)
}
