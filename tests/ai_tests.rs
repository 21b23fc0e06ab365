// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moduquote::commands::ai;
use moduquote::editor::{ItemUpdate, add_item_with};
use moduquote::genai::{COVER_LETTER_FAILED, GenAiError, TextGenerator};
use moduquote::models::Quotation;
use moduquote::store::{QuoteStore, SqliteStore};
use moduquote::cli;
use rust_decimal_macros::dec;
use tempfile::tempdir;

struct Fixed(Result<&'static str, ()>);

impl TextGenerator for Fixed {
    fn generate(&self, _prompt: &str) -> Result<String, GenAiError> {
        self.0.map(str::to_string).map_err(|_| GenAiError::MissingApiKey)
    }
}

fn base_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    let d = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
    let q = Quotation::new("q-1", "MQ-2025-0001", d, d, dec!(10), "");
    let (q, _) = add_item_with(
        q,
        [
            ItemUpdate::Category("Kitchen".into()),
            ItemUpdate::Name("Sink unit".into()),
            ItemUpdate::Description("old text".into()),
            ItemUpdate::Rate(dec!(12000)),
        ],
    );
    let (q, _) = add_item_with(q, [ItemUpdate::Rate(dec!(10))]);
    store.save(&[q]).unwrap();
    store
}

fn run_ai(store: &SqliteStore, generator: &Fixed, args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec!["moduquote", "ai"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("ai", ai_m)) = matches.subcommand() {
        match ai_m.subcommand() {
            Some(("describe", sub)) => return ai::describe(store, generator, sub),
            Some(("cover-letter", sub)) => return ai::cover_letter(store, generator, sub),
            _ => {}
        }
    }
    panic!("no ai subcommand");
}

fn description_of_first(store: &SqliteStore) -> String {
    store.load().unwrap()[0].items()[0].description.clone()
}

#[test]
fn describe_stores_generated_text() {
    let store = base_store();
    let generator = Fixed(Ok(" Marine ply carcass, acrylic shutters. "));
    let text = run_ai(&store, &generator, &["describe", "MQ-2025-0001", "1"]).unwrap();
    assert_eq!(text, "Marine ply carcass, acrylic shutters.");
    assert_eq!(description_of_first(&store), text);
}

#[test]
fn describe_dry_run_leaves_item() {
    let store = base_store();
    let generator = Fixed(Ok("New text"));
    let text = run_ai(&store, &generator, &["describe", "q-1", "1", "--dry-run"]).unwrap();
    assert_eq!(text, "New text");
    assert_eq!(description_of_first(&store), "old text");
}

#[test]
fn describe_failure_or_missing_name_changes_nothing() {
    let store = base_store();
    let before = store.load().unwrap();

    let failing = Fixed(Err(()));
    assert_eq!(run_ai(&store, &failing, &["describe", "q-1", "1"]).unwrap(), "");

    let generator = Fixed(Ok("unused"));
    assert_eq!(run_ai(&store, &generator, &["describe", "q-1", "2"]).unwrap(), "");

    assert_eq!(store.load().unwrap(), before);
}

#[test]
fn cover_letter_writes_file_or_falls_back() {
    let store = base_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("letter.txt");
    let out_str = out_path.to_string_lossy().to_string();

    let generator = Fixed(Ok("Dear customer,"));
    let letter = run_ai(
        &store,
        &generator,
        &["cover-letter", "MQ-2025-0001", "--out", &out_str],
    )
    .unwrap();
    assert_eq!(letter, "Dear customer,");
    assert_eq!(std::fs::read_to_string(&out_path).unwrap(), "Dear customer,");

    let failing = Fixed(Err(()));
    let letter = run_ai(&store, &failing, &["cover-letter", "MQ-2025-0001"]).unwrap();
    assert_eq!(letter, COVER_LETTER_FAILED);
}
