// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use moduquote::config::AiConfig;
use moduquote::genai::GeminiClient;
use moduquote::{cli, commands, logging, store};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init(matches.get_count("verbose"));

    let store = store::SqliteStore::open_default()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", store::db_path()?.display());
        }
        Some(("quote", sub)) => commands::quotes::handle(&store, sub)?,
        Some(("item", sub)) => commands::items::handle(&store, sub)?,
        Some(("render", sub)) => commands::render::handle(&store, sub)?,
        Some(("import", sub)) => commands::importer::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("ai", sub)) => {
            let client = GeminiClient::new(AiConfig::from_env())?;
            commands::ai::handle(&store, &client, sub)?
        }
        Some(("config", sub)) => commands::settings::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
