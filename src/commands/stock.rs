// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::inventory::{parse_production_entry, record_production};
use crate::models::StockItem;
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    match m.subcommand() {
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let data = RecordStore::<StockItem>::all(&store)?;
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                let rows = data
                    .into_iter()
                    .map(|s| vec![s.item_size, s.quantity.to_string()])
                    .collect();
                println!("{}", pretty_table(&["Item", "Quantity"], rows));
            }
        }
        Some(("produce", sub)) => {
            let entries = sub
                .get_many::<String>("add")
                .unwrap_or_default()
                .map(|raw| {
                    parse_production_entry(raw)
                        .ok_or_else(|| anyhow!("Invalid production entry '{}', expected ITEM=QTY", raw))
                })
                .collect::<Result<Vec<_>>>()?;
            let applied = record_production(&store, &entries)?;
            if applied.is_empty() {
                println!("No quantities entered");
            } else {
                for (item, qty) in &applied {
                    println!("+{} {}", qty, item);
                }
                println!("Stock updated successfully!");
            }
        }
        _ => {}
    }
    Ok(())
}
