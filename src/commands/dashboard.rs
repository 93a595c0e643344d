// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{DashboardStats, dashboard};
use crate::config::Settings;
use crate::models::{Expense, Order};
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn load_stats<S>(store: &S) -> Result<DashboardStats>
where
    S: RecordStore<Order> + RecordStore<Expense> + ?Sized,
{
    let orders = RecordStore::<Order>::all(store)?;
    let expenses = RecordStore::<Expense>::all(store)?;
    Ok(dashboard(&orders, &expenses))
}

pub fn stats_rows(stats: &DashboardStats, currency: &str) -> Vec<Vec<String>> {
    vec![
        vec!["Pending Orders".into(), stats.pending.to_string()],
        vec!["Completed Orders".into(), stats.completed.to_string()],
        vec![
            "Total Expenses".into(),
            fmt_money(&stats.total_expenses, currency),
        ],
    ]
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let stats = load_stats(&store)?;
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &stats)? {
        let settings = Settings::load(conn)?;
        println!(
            "{}",
            pretty_table(&["Metric", "Value"], stats_rows(&stats, &settings.currency))
        );
    }
    Ok(())
}
