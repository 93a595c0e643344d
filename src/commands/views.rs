// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Admin and workshop overviews.
//!
//! The current tab lives in an explicit [`AppState`]; [`render`] turns a
//! state plus a [`ViewSnapshot`] of the store into text and touches nothing
//! else.

use crate::aggregate::{DashboardStats, dashboard};
use crate::commands::dashboard::stats_rows;
use crate::commands::expenses::recent_expenses;
use crate::commands::orders::query_orders;
use crate::config::Settings;
use crate::models::{Expense, Order, OrderStatus, StockItem};
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{fmt_money, pretty_table};
use anyhow::{Result, bail};
use rusqlite::Connection;
use std::fmt::Write;
use std::str::FromStr;

const RECENT_EXPENSES: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Admin,
    Workshop,
}

impl FromStr for Tab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Tab::Admin),
            "workshop" => Ok(Tab::Workshop),
            other => bail!("Unknown tab '{}'", other),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppState {
    pub tab: Tab,
}

impl AppState {
    pub fn switch_tab(self, tab: Tab) -> Self {
        AppState { tab }
    }
}

/// Data a tab needs, loaded fresh on every render.
#[derive(Debug, Clone)]
pub enum ViewSnapshot {
    Admin {
        stats: DashboardStats,
        recent_expenses: Vec<Expense>,
        stock: Vec<StockItem>,
    },
    Workshop {
        pending: Vec<Order>,
    },
}

pub fn load_snapshot<S>(store: &S, state: AppState) -> Result<ViewSnapshot>
where
    S: RecordStore<Order> + RecordStore<Expense> + RecordStore<StockItem> + ?Sized,
{
    Ok(match state.tab {
        Tab::Admin => {
            let orders = RecordStore::<Order>::all(store)?;
            let expenses = RecordStore::<Expense>::all(store)?;
            ViewSnapshot::Admin {
                stats: dashboard(&orders, &expenses),
                recent_expenses: recent_expenses(store, RECENT_EXPENSES)?,
                stock: RecordStore::<StockItem>::all(store)?,
            }
        }
        Tab::Workshop => ViewSnapshot::Workshop {
            pending: query_orders(store, Some(OrderStatus::Pending), None)?,
        },
    })
}

pub fn render(settings: &Settings, snapshot: &ViewSnapshot) -> String {
    let mut out = String::new();
    match snapshot {
        ViewSnapshot::Admin {
            stats,
            recent_expenses,
            stock,
        } => {
            let _ = writeln!(out, "{} / ADMIN", settings.shop_name);
            let _ = writeln!(
                out,
                "{}",
                pretty_table(&["Metric", "Value"], stats_rows(stats, &settings.currency))
            );
            let _ = writeln!(out, "Recent expenses");
            if recent_expenses.is_empty() {
                let _ = writeln!(out, "No expenses recorded.");
            } else {
                let rows = recent_expenses
                    .iter()
                    .map(|e| {
                        vec![
                            e.date.clone(),
                            e.note.clone(),
                            fmt_money(&e.amount, &settings.currency),
                        ]
                    })
                    .collect();
                let _ = writeln!(out, "{}", pretty_table(&["Date", "Note", "Amount"], rows));
            }
            let _ = writeln!(out, "Stock");
            let rows = stock
                .iter()
                .map(|s| vec![s.item_size.clone(), s.quantity.to_string()])
                .collect();
            let _ = write!(out, "{}", pretty_table(&["Item", "Quantity"], rows));
        }
        ViewSnapshot::Workshop { pending } => {
            let _ = writeln!(out, "{} / WORKSHOP", settings.shop_name);
            if pending.is_empty() {
                let _ = write!(out, "No pending orders right now.");
                return out;
            }
            for o in pending {
                let _ = writeln!(
                    out,
                    "#{}  {}  [{}]  {}",
                    o.id,
                    o.customer_name,
                    o.payment_status.label(),
                    o.date
                );
                for line in o.details.lines() {
                    let _ = writeln!(out, "    {}", line);
                }
            }
            out.truncate(out.trim_end().len());
        }
    }
    out
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let tab: Tab = m
        .get_one::<String>("tab")
        .map(|s| s.parse::<Tab>())
        .transpose()?
        .unwrap_or_default();
    let state = AppState::default().switch_tab(tab);
    let snapshot = load_snapshot(&store, state)?;
    println!("{}", render(&Settings::load(conn)?, &snapshot));
    Ok(())
}
