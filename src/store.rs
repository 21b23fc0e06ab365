// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::models::Quotation;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Moduquote", "moduquote"));

/// Name of the slot that holds every quotation as one JSON array.
pub const QUOTES_SLOT: &str = "moduquote_data_v1";

/// Persistence for the quotation list and a few string settings.
pub trait QuoteStore {
    /// All quotations, newest first. A slot that fails to parse reads as empty.
    fn load(&self) -> Result<Vec<Quotation>>;
    /// Replace the stored list wholesale.
    fn save(&self, quotes: &[Quotation]) -> Result<()>;
    fn setting(&self, key: &str) -> Result<Option<String>>;
    fn set_setting(&self, key: &str, value: &str) -> Result<()>;
}

pub fn db_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var("MODUQUOTE_DB") {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p.trim()));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("moduquote.sqlite"))
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open_default() -> Result<Self> {
        Self::open(&db_path()?)
    }

    pub fn open(path: &Path) -> Result<Self> {
        let conn =
            Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn read_slot(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM slots WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    pub fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO slots(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}

impl QuoteStore for SqliteStore {
    fn load(&self) -> Result<Vec<Quotation>> {
        let Some(raw) = self.read_slot(QUOTES_SLOT)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Quotation>>(&raw) {
            Ok(quotes) => {
                debug!(count = quotes.len(), "loaded quotations");
                Ok(quotes)
            }
            Err(err) => {
                warn!(error = %err, "failed to parse stored quotations, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, quotes: &[Quotation]) -> Result<()> {
        let raw = serde_json::to_string(quotes).context("Serialize quotations")?;
        self.write_slot(QUOTES_SLOT, &raw)?;
        debug!(count = quotes.len(), "saved quotations");
        Ok(())
    }

    fn setting(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- one JSON document per named slot, rewritten wholesale on save
    CREATE TABLE IF NOT EXISTS slots(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}
