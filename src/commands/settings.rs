// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::{SettingKey, Settings, set_setting};
use crate::store::QuoteStore;
use crate::utils::pretty_table;

pub fn handle(store: &dyn QuoteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let settings = Settings::load(store)?;
            let rows = SettingKey::ALL
                .iter()
                .map(|k| vec![k.to_string(), settings.value_of(*k)])
                .collect();
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().parse::<SettingKey>()?;
            let value = set_setting(store, key, sub.get_one::<String>("value").unwrap())?;
            println!("{} set to {}", key, value);
        }
        _ => {}
    }
    Ok(())
}
