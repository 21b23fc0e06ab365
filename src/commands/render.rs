// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::document;
use crate::store::QuoteStore;
use crate::utils::find_quote;

pub fn handle(store: &dyn QuoteStore, m: &clap::ArgMatches) -> Result<()> {
    let quotes = store.load()?;
    let q = find_quote(&quotes, m.get_one::<String>("quote").unwrap())?;
    let settings = Settings::load(store)?;
    let doc = document::render(q, &settings);
    match m.get_one::<String>("out") {
        Some(out) => {
            let out = out.trim();
            std::fs::write(out, &doc).with_context(|| format!("Write {}", out))?;
            println!("Rendered {} {} to {}", document::document_title(q), q.number, out);
        }
        None => print!("{}", doc),
    }
    Ok(())
}
