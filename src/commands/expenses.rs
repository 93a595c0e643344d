// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    LEGACY_MONTH, MonthGroup, expenses_for_month, group_by_month, month_label, newest_first,
};
use crate::config::Settings;
use crate::models::{Expense, NewExpense};
use crate::print::expense_report;
use crate::store::{RecordStore, ScanOptions, SqliteStore};
use crate::utils::{fmt_money, lenient_amount, maybe_print_json, parse_month, pretty_table};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let settings = Settings::load(conn)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let note = sub.get_one::<String>("note").unwrap();
            let amount = lenient_amount(sub.get_one::<String>("amount").unwrap());
            add_expense(&store, note, amount, Local::now())?;
            println!(
                "Expense added: {} ({})",
                note.trim(),
                fmt_money(&amount, &settings.currency)
            );
        }
        Some(("list", sub)) => list(&store, &settings, sub)?,
        Some(("report", sub)) => report(&store, &settings, sub)?,
        Some(("print", sub)) => {
            let month = sub.get_one::<String>("month").unwrap();
            println!("{}", month_report(&store, &settings, month, Local::now())?);
        }
        _ => {}
    }
    Ok(())
}

/// Printable report for one month, given as `YYYY-MM` (single-digit months
/// accepted) or the legacy bucket name.
pub fn month_report<S>(
    store: &S,
    settings: &Settings,
    month: &str,
    printed_at: DateTime<Local>,
) -> Result<String>
where
    S: RecordStore<Expense> + ?Sized,
{
    let raw = month.trim();
    let key = if raw.eq_ignore_ascii_case(LEGACY_MONTH) {
        LEGACY_MONTH.to_string()
    } else {
        parse_month(raw)?
    };
    let all = store.all()?;
    let relevant = expenses_for_month(&all, &key);
    Ok(expense_report(settings, &month_label(&key), &relevant, printed_at))
}

pub fn add_expense<S>(store: &S, note: &str, amount: Decimal, now: DateTime<Local>) -> Result<i64>
where
    S: RecordStore<Expense> + ?Sized,
{
    let note = note.trim();
    if note.is_empty() {
        bail!("Expense note is empty");
    }
    let id = store
        .add(NewExpense::new(note, amount, now))
        .context("Error adding expense")?;
    tracing::info!(id, %amount, "expense added");
    Ok(id)
}

pub fn recent_expenses<S>(store: &S, limit: usize) -> Result<Vec<Expense>>
where
    S: RecordStore<Expense> + ?Sized,
{
    Ok(store.scan(&|_| true, ScanOptions::newest_first().limit(limit))?)
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthSummary {
    pub month: String,
    pub label: String,
    pub total: Decimal,
    pub count: usize,
}

impl From<&MonthGroup> for MonthSummary {
    fn from(g: &MonthGroup) -> Self {
        MonthSummary {
            month: g.key.clone(),
            label: month_label(&g.key),
            total: g.total,
            count: g.count,
        }
    }
}

pub fn monthly_report<S>(store: &S) -> Result<Vec<MonthSummary>>
where
    S: RecordStore<Expense> + ?Sized,
{
    let all = store.all()?;
    Ok(newest_first(group_by_month(&all))
        .iter()
        .map(MonthSummary::from)
        .collect())
}

fn list(store: &SqliteStore<'_>, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limit = *sub.get_one::<usize>("limit").unwrap_or(&10);
    let data = recent_expenses(store, limit)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No expenses recorded.");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.date.clone(),
                    e.note.clone(),
                    fmt_money(&e.amount, &settings.currency),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Note", "Amount"], rows));
    }
    Ok(())
}

fn report(store: &SqliteStore<'_>, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = monthly_report(store)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No expense records found.");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                vec![
                    s.label.clone(),
                    fmt_money(&s.total, &settings.currency),
                    format!("{} items", s.count),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Total", "Count"], rows));
    }
    Ok(())
}
