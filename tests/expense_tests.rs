// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Local, TimeZone};
use decora::aggregate::{
    LEGACY_MONTH, expenses_for_month, group_by_month, month_key, month_label, newest_first,
};
use decora::commands::expenses::{
    self, add_expense, month_report, monthly_report, recent_expenses,
};
use decora::config::Settings;
use decora::models::Expense;
use decora::print::expense_report;
use decora::store::{RecordStore, SqliteStore};
use decora::utils::{fmt_money, lenient_amount, parse_month};
use decora::{cli, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn expense(id: i64, amount: &str, iso_month: Option<&str>, timestamp: Option<i64>) -> Expense {
    Expense {
        id,
        note: format!("item {}", id),
        amount: amount.parse().unwrap(),
        date: "01/01/2025".into(),
        iso_month: iso_month.map(String::from),
        timestamp,
    }
}

#[test]
fn groups_by_month_and_sorts_newest_first() {
    let data = vec![
        expense(1, "100", Some("2025-01"), None),
        expense(2, "50", Some("2025-02"), None),
    ];
    let groups = group_by_month(&data);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key, "2025-01");
    assert_eq!(groups[0].total, Decimal::from(100));
    assert_eq!(groups[1].total, Decimal::from(50));

    let sorted = newest_first(groups);
    let keys: Vec<_> = sorted.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, ["2025-02", "2025-01"]);
}

#[test]
fn group_totals_and_counts_accumulate() {
    let data = vec![
        expense(1, "10.25", Some("2025-03"), None),
        expense(2, "4.75", Some("2025-04"), None),
        expense(3, "5", Some("2025-03"), None),
    ];
    let groups = group_by_month(&data);
    assert_eq!(groups[0].key, "2025-03");
    assert_eq!(groups[0].count, 2);
    assert_eq!(groups[0].total, "15.25".parse::<Decimal>().unwrap());
    let ids: Vec<_> = groups[0].items.iter().map(|e| e.id).collect();
    assert_eq!(ids, [1, 3]);
}

#[test]
fn legacy_rows_fall_back_to_timestamp_or_bucket() {
    let mid_march = Local
        .with_ymd_and_hms(2025, 3, 15, 12, 0, 0)
        .unwrap()
        .timestamp_millis();
    let from_ts = expense(1, "20", None, Some(mid_march));
    let bare = expense(2, "30", None, None);
    assert_eq!(month_key(&from_ts), "2025-03");
    assert_eq!(month_key(&bare), LEGACY_MONTH);

    let data = vec![from_ts, bare, expense(3, "1", Some("2025-03"), None)];
    let groups = group_by_month(&data);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].count, 2);
    assert_eq!(expenses_for_month(&data, LEGACY_MONTH).len(), 1);
    assert_eq!(expenses_for_month(&data, "2025-03").len(), 2);
}

#[test]
fn month_labels() {
    assert_eq!(month_label("2026-02"), "February 2026");
    assert_eq!(month_label("2025-12"), "December 2025");
    assert_eq!(month_label(LEGACY_MONTH), LEGACY_MONTH);
    assert_eq!(month_label("2025-13"), "2025-13");
}

#[test]
fn amount_input_is_coerced() {
    assert_eq!(lenient_amount("12.50"), "12.50".parse::<Decimal>().unwrap());
    assert_eq!(lenient_amount(" 7 "), Decimal::from(7));
    assert_eq!(lenient_amount("abc"), Decimal::ZERO);
    assert_eq!(lenient_amount("-5"), Decimal::ZERO);
    assert_eq!(lenient_amount(""), Decimal::ZERO);
}

#[test]
fn money_is_grouped_with_two_decimals() {
    assert_eq!(fmt_money(&"1234.5".parse().unwrap(), "LKR"), "LKR 1,234.50");
    assert_eq!(fmt_money(&Decimal::from(1234567), "LKR"), "LKR 1,234,567.00");
    assert_eq!(fmt_money(&Decimal::ZERO, "USD"), "USD 0.00");
    assert_eq!(fmt_money(&"999.999".parse().unwrap(), "LKR"), "LKR 1,000.00");
}

#[test]
fn recent_expenses_are_newest_first_and_limited() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let now = Local.with_ymd_and_hms(2025, 5, 2, 9, 0, 0).unwrap();
    for i in 1..=12 {
        add_expense(&store, &format!("note {}", i), Decimal::from(i), now).unwrap();
    }
    let recent = recent_expenses(&store, 10).unwrap();
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].note, "note 12");
    assert_eq!(recent[9].note, "note 3");
    assert!(add_expense(&store, "  ", Decimal::ONE, now).is_err());
}

#[test]
fn expense_add_via_cli_coerces_bad_amount() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "decora", "expense", "add", "--note", "Sandpaper", "--amount", "twelve",
    ]);
    if let Some(("expense", exp_m)) = matches.subcommand() {
        expenses::handle(&conn, exp_m).unwrap();
    } else {
        panic!("expense command not parsed");
    }
    let store = SqliteStore::new(&conn);
    let all = RecordStore::<Expense>::all(&store).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].note, "Sandpaper");
    assert_eq!(all[0].amount, Decimal::ZERO);
    assert!(all[0].iso_month.is_some());
}

#[test]
fn monthly_report_from_store() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let jan = Local.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
    let feb = Local.with_ymd_and_hms(2025, 2, 10, 9, 0, 0).unwrap();
    add_expense(&store, "Timber", Decimal::from(100), jan).unwrap();
    add_expense(&store, "Nails", Decimal::from(50), feb).unwrap();
    add_expense(&store, "Varnish", Decimal::from(25), feb).unwrap();

    let report = monthly_report(&store).unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].month, "2025-02");
    assert_eq!(report[0].label, "February 2025");
    assert_eq!(report[0].total, Decimal::from(75));
    assert_eq!(report[0].count, 2);
    assert_eq!(report[1].total, Decimal::from(100));
}

#[test]
fn printed_report_has_rows_and_total() {
    let data = vec![
        expense(1, "1200", Some("2025-02"), None),
        expense(2, "300.5", Some("2025-02"), None),
        expense(3, "99", Some("2025-01"), None),
    ];
    let settings = Settings {
        shop_name: "Amazing Decora".into(),
        currency: "LKR".into(),
    };
    let relevant = expenses_for_month(&data, "2025-02");
    let printed = Local.with_ymd_and_hms(2025, 3, 1, 18, 30, 0).unwrap();
    let text = expense_report(&settings, &month_label("2025-02"), &relevant, printed);
    assert!(text.starts_with("AMAZING DECORA\nEXPENSE REPORT: February 2025"));
    assert!(text.contains("item 1"));
    assert!(text.contains("item 2"));
    assert!(!text.contains("item 3"));
    assert!(text.contains("TOTAL:"));
    assert!(text.contains("LKR 1,500.50"));
    assert!(text.ends_with("Printed on 01/03/2025 18:30:00"));
}

#[test]
fn single_digit_month_prints_the_padded_month() {
    assert_eq!(parse_month("2025-1").unwrap(), "2025-01");
    assert_eq!(parse_month("2025-11").unwrap(), "2025-11");
    assert!(parse_month("2025-13").is_err());

    let conn = setup();
    let store = SqliteStore::new(&conn);
    let jan = Local.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
    let feb = Local.with_ymd_and_hms(2025, 2, 10, 9, 0, 0).unwrap();
    add_expense(&store, "Timber", Decimal::from(100), jan).unwrap();
    add_expense(&store, "Nails", Decimal::from(50), feb).unwrap();

    let settings = Settings::load(&conn).unwrap();
    let text = month_report(&store, &settings, "2025-1", jan).unwrap();
    assert!(text.contains("EXPENSE REPORT: January 2025"));
    assert!(text.contains("Timber"));
    assert!(!text.contains("Nails"));
    assert!(text.contains("LKR 100.00"));
}
