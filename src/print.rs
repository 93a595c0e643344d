// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Plain-text print layouts.

use crate::config::Settings;
use crate::models::{Expense, Order, display_date};
use crate::utils::{fmt_money, pretty_table};
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use std::fmt::Write;

const RULE: &str = "----------------------------------------";

fn header(out: &mut String, shop: &str, title: &str) {
    let _ = writeln!(out, "{}", shop.to_uppercase());
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", RULE);
}

pub fn job_slip(settings: &Settings, order: &Order, printed_at: DateTime<Local>) -> String {
    let mut out = String::new();
    header(&mut out, &settings.shop_name, "JOB SLIP / ORDER RECEIPT");
    let _ = writeln!(out, "Date: {}", display_date(printed_at));
    let _ = writeln!(out, "Order ID: #{}", order.id);
    let _ = writeln!(out, "{}", order.payment_status.label());
    let _ = writeln!(out);
    let _ = writeln!(out, "Customer: {}", order.customer_name);
    let _ = writeln!(out, "Phone: {}", order.phone);
    let _ = writeln!(out, "Address: {}", order.address);
    let _ = writeln!(out);
    let _ = writeln!(out, "ORDER DETAILS:");
    for line in order.details.lines() {
        let _ = writeln!(out, "  {}", line);
    }
    let _ = writeln!(out, "{}", RULE);
    let _ = write!(out, "Thank you for choosing {}!", settings.shop_name);
    out
}

pub fn expense_report(
    settings: &Settings,
    label: &str,
    expenses: &[&Expense],
    printed_at: DateTime<Local>,
) -> String {
    let mut out = String::new();
    header(
        &mut out,
        &settings.shop_name,
        &format!("EXPENSE REPORT: {}", label),
    );
    let total: Decimal = expenses.iter().map(|e| e.amount).sum();
    let mut rows: Vec<Vec<String>> = expenses
        .iter()
        .map(|e| {
            vec![
                e.date.clone(),
                e.note.clone(),
                fmt_money(&e.amount, &settings.currency),
            ]
        })
        .collect();
    rows.push(vec![
        String::new(),
        "TOTAL:".to_string(),
        fmt_money(&total, &settings.currency),
    ]);
    let _ = writeln!(out, "{}", pretty_table(&["Date", "Description", "Amount"], rows));
    let _ = write!(
        out,
        "Printed on {}",
        printed_at.format("%d/%m/%Y %H:%M:%S")
    );
    out
}
