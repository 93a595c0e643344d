// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::deduct::{Deduction, deduct, normalize_quantity_markers, summarize};
use crate::models::{NewOrder, Order, OrderPatch, OrderStatus, PaymentStatus, StockItem};
use crate::print::job_slip;
use crate::store::{RecordStore, ScanOptions, SqliteStore};
use crate::utils::{maybe_print_json, parse_id, pretty_table};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    match m.subcommand() {
        Some(("add", sub)) => add(&store, sub)?,
        Some(("list", sub)) => list(&store, sub)?,
        Some(("show", sub)) => show(&store, sub)?,
        Some(("complete", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let report = complete_order(&store, &store, id)?;
            println!("Order #{} completed ({})", id, report.customer_name);
            println!("{}", summarize(&report.deductions));
        }
        Some(("revert", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            revert_order(&store, id)?;
            println!("Order #{} moved back to pending", id);
        }
        Some(("print", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let order = load_order(&store, id)?;
            let settings = Settings::load(conn)?;
            println!("{}", job_slip(&settings, &order, Local::now()));
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &SqliteStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let details = match sub.get_one::<String>("file") {
        Some(path) => std::fs::read_to_string(path.trim())
            .with_context(|| format!("Read order text from {}", path))?,
        None => sub.get_one::<String>("details").cloned().unwrap_or_default(),
    };
    let payment: PaymentStatus = sub.get_one::<String>("payment").unwrap().parse()?;
    let id = create_order(store, &details, payment, Local::now())?;
    println!("Order #{} created", id);
    Ok(())
}

fn list(store: &SqliteStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let status = sub
        .get_one::<String>("status")
        .map(|s| s.parse::<OrderStatus>())
        .transpose()?;
    let limit = sub.get_one::<usize>("limit").copied();
    let data = query_orders(store, status, limit)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|o| {
                vec![
                    format!("#{}", o.id),
                    o.date.clone(),
                    o.customer_name.clone(),
                    o.payment_status.label().to_string(),
                    o.status.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Customer", "Payment", "Status"], rows)
        );
    }
    Ok(())
}

fn show(store: &SqliteStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let o = load_order(store, id)?;
    println!(
        "{}",
        pretty_table(
            &["Field", "Value"],
            vec![
                vec!["ID".into(), format!("#{}", o.id)],
                vec!["Customer".into(), o.customer_name.clone()],
                vec!["Phone".into(), o.phone.clone()],
                vec!["Address".into(), o.address.clone()],
                vec!["Payment".into(), o.payment_status.label().into()],
                vec!["Status".into(), o.status.to_string()],
                vec!["Date".into(), o.date.clone()],
                vec!["Details".into(), o.details.clone()],
            ],
        )
    );
    Ok(())
}

pub fn load_order<S>(store: &S, id: i64) -> Result<Order>
where
    S: RecordStore<Order> + ?Sized,
{
    store
        .get(&id)?
        .with_context(|| format!("Order #{} not found", id))
}

pub fn create_order<S>(
    store: &S,
    details: &str,
    payment: PaymentStatus,
    now: DateTime<Local>,
) -> Result<i64>
where
    S: RecordStore<Order> + ?Sized,
{
    let details = normalize_quantity_markers(details);
    if details.trim().is_empty() {
        bail!("Order details are empty");
    }
    let draft = NewOrder::from_details(&details, payment, now);
    let customer = draft.customer_name.clone();
    let id = store.add(draft).context("Error creating order")?;
    tracing::info!(id, customer = %customer, "order created");
    Ok(id)
}

/// Orders newest first, optionally restricted to one status.
pub fn query_orders<S>(
    store: &S,
    status: Option<OrderStatus>,
    limit: Option<usize>,
) -> Result<Vec<Order>>
where
    S: RecordStore<Order> + ?Sized,
{
    let mut opts = ScanOptions::newest_first();
    if let Some(n) = limit {
        opts = opts.limit(n);
    }
    let keep = |o: &Order| status.is_none_or(|s| o.status == s);
    Ok(store.scan(&keep, opts)?)
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionReport {
    pub order_id: i64,
    pub customer_name: String,
    pub deductions: Vec<Deduction>,
}

/// Deducts the order's lines from stock, then marks it completed.
pub fn complete_order<O, S>(orders: &O, stock: &S, id: i64) -> Result<CompletionReport>
where
    O: RecordStore<Order> + ?Sized,
    S: RecordStore<StockItem> + ?Sized,
{
    let order = load_order(orders, id)?;
    if order.status == OrderStatus::Completed {
        bail!("Order #{} is already completed", id);
    }
    let catalog = stock.all()?;
    let deductions = deduct(stock, &order.details, catalog)
        .with_context(|| format!("Deduct stock for order #{}", id))?;
    orders.update(&id, OrderPatch::status(OrderStatus::Completed))?;
    tracing::info!(id, lines = deductions.len(), "order completed");
    Ok(CompletionReport {
        order_id: id,
        customer_name: order.customer_name,
        deductions,
    })
}

/// Back to pending. Stock deducted on completion is not restored.
pub fn revert_order<S>(store: &S, id: i64) -> Result<()>
where
    S: RecordStore<Order> + ?Sized,
{
    load_order(store, id)?;
    store.update(&id, OrderPatch::status(OrderStatus::Pending))?;
    tracing::info!(id, "order reverted to pending");
    Ok(())
}
