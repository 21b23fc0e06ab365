// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moduquote::editor::{ItemUpdate, QuoteEdit, add_item_with, apply};
use moduquote::models::{Quotation, Unit};
use moduquote::store::{QuoteStore, SqliteStore};
use moduquote::{cli, commands::exporter};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::tempdir;

fn seeded_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    let d = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
    let mut q = Quotation::new("q-1", "MQ-2025-0001", d, d, dec!(10), "");
    q.customer.name = "Asha Rao".into();
    let (q, _) = add_item_with(
        q,
        [
            ItemUpdate::Category("Kitchen".into()),
            ItemUpdate::Name("Base unit, 3 drawer".into()),
            ItemUpdate::Quantity(dec!(2)),
            ItemUpdate::Unit(Unit::RFt),
            ItemUpdate::Rate(dec!(500)),
        ],
    );
    let (q, _) = add_item_with(
        q,
        [
            ItemUpdate::Category("Kitchen".into()),
            ItemUpdate::Name("Tall unit".into()),
            ItemUpdate::Rate(dec!(1500)),
        ],
    );
    let q = apply(q, QuoteEdit::SetDiscount(dec!(200)));
    store.save(&[q]).unwrap();
    store
}

fn amount(row: &csv::StringRecord) -> Decimal {
    row[7].parse().unwrap()
}

fn run_export(store: &SqliteStore, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["moduquote", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(store, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_quote_json_matches_stored_snapshot() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("quote.json");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(
        &store,
        &["quote", "MQ-2025-0001", "--format", "JSON", "--out", &out_str],
    )
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: Quotation = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed, store.load().unwrap()[0]);

    let raw: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(raw["validUntil"], "2025-08-01");
    assert_eq!(raw["items"][0]["unit"], "R.Ft");
    let total: Decimal = raw["total"].as_str().unwrap().parse().unwrap();
    assert_eq!(total, dec!(2530));
}

#[test]
fn export_quote_csv_has_items_then_totals() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("quote.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(
        &store,
        &["quote", "q-1", "--format", "csv", "--out", &out_str],
    )
    .unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["number", "category", "name", "description", "quantity", "unit", "rate", "amount"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 7);
    assert_eq!(&rows[0][2], "Base unit, 3 drawer");
    assert_eq!(&rows[0][5], "R.Ft");
    assert_eq!(amount(&rows[0]), dec!(1000));
    assert_eq!(amount(&rows[1]), dec!(1500));

    let totals: Vec<(&str, Decimal)> = rows[2..].iter().map(|r| (&r[2], amount(r))).collect();
    assert_eq!(
        totals,
        vec![
            ("subtotal", dec!(2500)),
            ("discount", dec!(200)),
            ("tax_rate", dec!(10)),
            ("tax_amount", dec!(230)),
            ("total", dec!(2530)),
        ]
    );
}

#[test]
fn export_quotes_writes_every_quotation() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("all.json");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&store, &["quotes", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: Vec<Quotation> = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed, store.load().unwrap());
}

#[test]
fn export_quote_rejects_unknown_format() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("quote.xml");
    let out_str = out_path.to_string_lossy().to_string();

    let err = run_export(
        &store,
        &["quote", "MQ-2025-0001", "--format", "xml", "--out", &out_str],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unknown format: xml"));
    assert!(!out_path.exists());
}

#[test]
fn export_unknown_quote_fails() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("quote.json");
    let out_str = out_path.to_string_lossy().to_string();

    let err = run_export(
        &store,
        &["quote", "MQ-2025-0099", "--format", "json", "--out", &out_str],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Quotation 'MQ-2025-0099' not found"));
    assert!(!out_path.exists());
}
