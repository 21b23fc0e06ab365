// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::models::{Dimensions, Quotation};
use crate::store::QuoteStore;

const UA: &str = concat!(
    "moduquote/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/moduquote)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

// Leading numeric part of a form value, the way a browser number field reads it.
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").expect("numeric prefix pattern")
});

/// Read a number from free-form input. Anything unreadable becomes zero.
pub fn coerce_decimal(raw: &str) -> Decimal {
    let s = raw.trim();
    if let Ok(d) = s.parse::<Decimal>() {
        return d;
    }
    let Some(m) = NUMERIC_PREFIX.find(s) else {
        return Decimal::ZERO;
    };
    let mut prefix = m.as_str().trim_start_matches('+').to_string();
    if prefix.starts_with('.') {
        prefix.insert(0, '0');
    } else if prefix.starts_with("-.") {
        prefix.insert(1, '0');
    }
    prefix
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&prefix))
        .unwrap_or(Decimal::ZERO)
}

/// `LxHxD`, e.g. `1200x600x560`. Missing or unreadable parts are zero.
pub fn parse_dimensions(s: &str) -> Dimensions {
    let mut parts = s.split(['x', 'X', '*']).map(coerce_decimal);
    Dimensions::new(
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
    )
}

/// Serde adapter for stored decimals: written as strings, read from numbers,
/// numeric strings, or anything else (which reads as zero).
pub mod lenient_decimal {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(match raw {
            Value::Number(n) => super::coerce_decimal(&n.to_string()),
            Value::String(s) => super::coerce_decimal(&s),
            _ => Decimal::ZERO,
        })
    }
}

/// Serde adapter for stored dates: written as `YYYY-MM-DD`, read from that,
/// an ISO timestamp, or the browser's locale forms (`8/1/2025`, `1.8.2025`).
/// An unreadable date reads as the default date rather than failing the list.
pub mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;
    use tracing::warn;

    const FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%d.%m.%Y"];

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let s = raw.trim();
        // `2025-08-01T10:00:00.000Z` keeps only its date part
        let s = match s.split_once('T') {
            Some((day, _)) if day.len() == 10 => day,
            _ => s,
        };
        FORMATS
            .iter()
            .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
    }

    pub fn serialize<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let parsed = raw.as_str().and_then(parse);
        Ok(parsed.unwrap_or_else(|| {
            warn!(value = %raw, "unreadable stored date, using default");
            NaiveDate::default()
        }))
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Position of a quotation addressed by id or (case-insensitive) number.
pub fn quote_index(quotes: &[Quotation], key: &str) -> Result<usize> {
    let key = key.trim();
    quotes
        .iter()
        .position(|q| q.id == key || q.number.eq_ignore_ascii_case(key))
        .ok_or_else(|| anyhow!("Quotation '{}' not found", key))
}

pub fn find_quote<'a>(quotes: &'a [Quotation], key: &str) -> Result<&'a Quotation> {
    Ok(&quotes[quote_index(quotes, key)?])
}

/// Resolve an item reference typed by the user: full id, unique id prefix,
/// or 1-based position in the quotation.
pub fn resolve_item_id(quote: &Quotation, key: &str) -> Result<String> {
    let key = key.trim();
    let items = quote.items();
    if let Some(item) = items.iter().find(|i| i.id == key) {
        return Ok(item.id.clone());
    }
    if let Ok(pos) = key.trim_start_matches('#').parse::<usize>() {
        if pos >= 1 && pos <= items.len() {
            return Ok(items[pos - 1].id.clone());
        }
    }
    let matches: Vec<&str> = items
        .iter()
        .filter(|i| !key.is_empty() && i.id.starts_with(key))
        .map(|i| i.id.as_str())
        .collect();
    match matches.as_slice() {
        [one] => Ok((*one).to_string()),
        [] => Err(anyhow!("Item '{}' not found in {}", key, quote.number)),
        _ => Err(anyhow!("Item '{}' is ambiguous in {}", key, quote.number)),
    }
}

/// Load, change one quotation, save the whole list back.
pub fn update_quote<F>(store: &dyn QuoteStore, key: &str, f: F) -> Result<Quotation>
where
    F: FnOnce(Quotation) -> Result<Quotation>,
{
    let mut quotes = store.load()?;
    let idx = quote_index(&quotes, key)?;
    let updated = f(quotes[idx].clone())?;
    quotes[idx] = updated.clone();
    store.save(&quotes)?;
    Ok(updated)
}

pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
