// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Local, TimeZone};
use decora::commands::orders::{
    self, complete_order, create_order, load_order, query_orders, revert_order,
};
use decora::config::Settings;
use decora::models::{NO_NAME, NewOrder, OrderStatus, PaymentStatus, SEE_DETAILS, StockItem};
use decora::print::job_slip;
use decora::store::{RecordStore, SqliteStore};
use decora::{cli, db, inventory};
use rusqlite::Connection;
use std::io::Write;
use tempfile::NamedTempFile;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let store = SqliteStore::new(&conn);
    inventory::seed_catalog(&store).unwrap();
    inventory::record_production(
        &store,
        &[
            ("Ladder 3.0ft".to_string(), 10),
            ("Wood Pole 1.5ft".to_string(), 10),
        ],
    )
    .unwrap();
    conn
}

fn qty(conn: &Connection, name: &str) -> u32 {
    RecordStore::<StockItem>::get(&SqliteStore::new(conn), &name.to_string())
        .unwrap()
        .unwrap()
        .quantity
}

#[test]
fn customer_name_comes_from_first_line() {
    let now = Local.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
    let o = NewOrder::from_details(
        "  Mrs. Wijesinghe of the Orchid Growers Society, Kandy\n0771234567\n2 x Ladder 3.0ft\n",
        PaymentStatus::Paid,
        now,
    );
    assert_eq!(o.customer_name, "Mrs. Wijesinghe of the Orchid ");
    assert_eq!(o.customer_name.chars().count(), 30);
    assert_eq!(o.address, SEE_DETAILS);
    assert_eq!(o.phone, SEE_DETAILS);
    assert_eq!(o.status, OrderStatus::Pending);
    assert!(o.details.starts_with("Mrs."));
    assert!(o.details.ends_with("Ladder 3.0ft"));
    assert_eq!(o.timestamp, now.timestamp_millis());

    let blank = NewOrder::from_details("   ", PaymentStatus::NotPaid, now);
    assert_eq!(blank.customer_name, NO_NAME);
}

#[test]
fn empty_order_text_is_rejected() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let err = create_order(&store, " \n ", PaymentStatus::Paid, Local::now()).unwrap_err();
    assert!(err.to_string().contains("empty"));
}

#[test]
fn order_add_via_cli_normalizes_multipliers() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "decora",
        "order",
        "add",
        "--details",
        "Nimal\n2 x Ladder 3.0ft",
        "--payment",
        "paid",
    ]);
    if let Some(("order", order_m)) = matches.subcommand() {
        orders::handle(&conn, order_m).unwrap();
    } else {
        panic!("order command not parsed");
    }
    let store = SqliteStore::new(&conn);
    let o = load_order(&store, 1).unwrap();
    assert_eq!(o.customer_name, "Nimal");
    assert_eq!(o.details, "Nimal\n2 * Ladder 3.0ft");
    assert_eq!(o.payment_status, PaymentStatus::Paid);
}

#[test]
fn complete_deducts_stock_once() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let id = create_order(
        &store,
        "Sunil\n0771234567 is the phone\n2x Ladder 3.0ft\nWood Pole 1.5ft\nsomething else",
        PaymentStatus::NotPaid,
        Local::now(),
    )
    .unwrap();

    let report = complete_order(&store, &store, id).unwrap();
    assert_eq!(report.customer_name, "Sunil");
    let items: Vec<_> = report
        .deductions
        .iter()
        .map(|d| (d.item_name.as_str(), d.quantity_deducted))
        .collect();
    assert_eq!(items, [("Ladder 3.0ft", 2), ("Wood Pole 1.5ft", 1)]);
    assert_eq!(qty(&conn, "Ladder 3.0ft"), 8);
    assert_eq!(qty(&conn, "Wood Pole 1.5ft"), 9);
    assert_eq!(load_order(&store, id).unwrap().status, OrderStatus::Completed);

    let err = complete_order(&store, &store, id).unwrap_err();
    assert!(err.to_string().contains("already completed"));
    assert_eq!(qty(&conn, "Ladder 3.0ft"), 8);
}

#[test]
fn complete_missing_order_fails() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let err = complete_order(&store, &store, 99).unwrap_err();
    assert!(err.to_string().contains("#99 not found"));
}

#[test]
fn revert_moves_back_to_pending_without_restocking() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let id = create_order(&store, "Ruwan\n3 Ladder 3.0ft", PaymentStatus::Paid, Local::now())
        .unwrap();
    complete_order(&store, &store, id).unwrap();
    assert_eq!(qty(&conn, "Ladder 3.0ft"), 7);

    let matches = cli::build_cli().get_matches_from(["decora", "order", "revert", "#1"]);
    if let Some(("order", order_m)) = matches.subcommand() {
        orders::handle(&conn, order_m).unwrap();
    } else {
        panic!("order command not parsed");
    }
    assert_eq!(load_order(&store, id).unwrap().status, OrderStatus::Pending);
    assert_eq!(qty(&conn, "Ladder 3.0ft"), 7);
    assert!(revert_order(&store, 5).is_err());
}

#[test]
fn listing_is_newest_first_by_status() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    for name in ["First", "Second", "Third"] {
        create_order(&store, name, PaymentStatus::NotPaid, Local::now()).unwrap();
    }
    complete_order(&store, &store, 2).unwrap();

    let pending = query_orders(&store, Some(OrderStatus::Pending), None).unwrap();
    let names: Vec<_> = pending.iter().map(|o| o.customer_name.as_str()).collect();
    assert_eq!(names, ["Third", "First"]);

    let completed = query_orders(&store, Some(OrderStatus::Completed), None).unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].customer_name, "Second");

    assert_eq!(query_orders(&store, None, Some(2)).unwrap().len(), 2);
}

#[test]
fn job_slip_shows_order() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let id = create_order(&store, "Dilani\n2 Ladder 3.0ft", PaymentStatus::Paid, Local::now())
        .unwrap();
    let order = load_order(&store, id).unwrap();
    let settings = Settings::load(&conn).unwrap();
    let printed = Local.with_ymd_and_hms(2025, 7, 4, 8, 0, 0).unwrap();
    let slip = job_slip(&settings, &order, printed);
    assert!(slip.starts_with("AMAZING DECORA\nJOB SLIP / ORDER RECEIPT"));
    assert!(slip.contains("Date: 04/07/2025"));
    assert!(slip.contains("Order ID: #1"));
    assert!(slip.contains("\nPAID\n"));
    assert!(slip.contains("Customer: Dilani"));
    assert!(slip.contains("  2 Ladder 3.0ft"));
    assert!(slip.ends_with("Thank you for choosing Amazing Decora!"));
}

#[test]
fn order_add_reads_text_from_file() {
    let conn = setup();
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "Pradeep Silva\n077 555 1234\n4 x Wood Pole 1.5ft\n").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let matches =
        cli::build_cli().get_matches_from(["decora", "order", "add", "--file", path.as_str()]);
    if let Some(("order", order_m)) = matches.subcommand() {
        orders::handle(&conn, order_m).unwrap();
    } else {
        panic!("order command not parsed");
    }
    let store = SqliteStore::new(&conn);
    let o = load_order(&store, 1).unwrap();
    assert_eq!(o.customer_name, "Pradeep Silva");
    assert_eq!(o.payment_status, PaymentStatus::NotPaid);
    assert_eq!(o.details, "Pradeep Silva\n077 555 1234\n4 * Wood Pole 1.5ft");
}
