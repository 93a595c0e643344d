// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Expense, Order, OrderStatus};
use chrono::{Datelike, Local, NaiveDate, TimeZone};
use rust_decimal::Decimal;
use serde::Serialize;

pub const LEGACY_MONTH: &str = "Legacy Data";

#[derive(Debug, Clone, Serialize)]
pub struct MonthGroup {
    pub key: String,
    pub total: Decimal,
    pub count: usize,
    pub items: Vec<Expense>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub pending: usize,
    pub completed: usize,
    pub total_expenses: Decimal,
}

/// Grouping key of an expense: its stored month, else the month of its
/// timestamp, else [`LEGACY_MONTH`].
pub fn month_key(e: &Expense) -> String {
    if let Some(m) = e.iso_month.as_deref().filter(|m| !m.is_empty()) {
        return m.to_string();
    }
    e.timestamp
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|d| format!("{}-{:02}", d.year(), d.month()))
        .unwrap_or_else(|| LEGACY_MONTH.to_string())
}

/// Groups in the order months are first encountered.
pub fn group_by_month(expenses: &[Expense]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    for e in expenses {
        let key = month_key(e);
        let idx = match groups.iter().position(|g| g.key == key) {
            Some(i) => i,
            None => {
                groups.push(MonthGroup {
                    key,
                    total: Decimal::ZERO,
                    count: 0,
                    items: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let g = &mut groups[idx];
        g.total += e.amount;
        g.count += 1;
        g.items.push(e.clone());
    }
    groups
}

/// Keys are zero-padded `YYYY-MM`, so a descending string sort is newest first.
pub fn newest_first(mut groups: Vec<MonthGroup>) -> Vec<MonthGroup> {
    groups.sort_by(|a, b| b.key.cmp(&a.key));
    groups
}

pub fn expenses_for_month<'a>(expenses: &'a [Expense], key: &str) -> Vec<&'a Expense> {
    expenses.iter().filter(|e| month_key(e) == key).collect()
}

/// "2026-02" -> "February 2026"; any other key is returned unchanged.
pub fn month_label(key: &str) -> String {
    let well_formed = key.len() == 7
        && key.as_bytes()[4] == b'-'
        && key
            .bytes()
            .enumerate()
            .all(|(i, b)| i == 4 || b.is_ascii_digit());
    if !well_formed {
        return key.to_string();
    }
    NaiveDate::parse_from_str(&format!("{}-01", key), "%Y-%m-%d")
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|_| key.to_string())
}

pub fn dashboard(orders: &[Order], expenses: &[Expense]) -> DashboardStats {
    let pending = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Pending)
        .count();
    let completed = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
        .count();
    let total_expenses = expenses.iter().map(|e| e.amount).sum();
    DashboardStats {
        pending,
        completed,
        total_expenses,
    }
}
