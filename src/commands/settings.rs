// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Settings, set_currency, set_shop_name};
use crate::db::db_path;
use crate::utils::pretty_table;
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let s = Settings::load(conn)?;
            println!(
                "{}",
                pretty_table(
                    &["Setting", "Value"],
                    vec![
                        vec!["Shop name".into(), s.shop_name],
                        vec!["Currency".into(), s.currency],
                        vec!["Database".into(), db_path()?.display().to_string()],
                    ],
                )
            );
        }
        Some(("set", sub)) => {
            let name = sub
                .get_one::<String>("shop_name")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty());
            let ccy = sub
                .get_one::<String>("currency")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty());
            if name.is_none() && ccy.is_none() {
                bail!("Nothing to set; pass --shop-name and/or --currency");
            }
            if let Some(n) = name {
                set_shop_name(conn, n)?;
                println!("Shop name set to {}", n);
            }
            if let Some(c) = ccy {
                set_currency(conn, c)?;
                println!("Currency set to {}", c.to_uppercase());
            }
        }
        _ => {}
    }
    Ok(())
}
