// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed record store.
//!
//! Every record type names its table, key, insert draft and update patch via
//! [`Record`]; [`RecordStore`] is the get/add/update/scan surface the rest of
//! the crate is written against. [`SqliteStore`] implements it for all three
//! record types over a borrowed rusqlite connection.

use crate::models::{
    Expense, NewExpense, NewOrder, Order, OrderPatch, OrderStatus, PaymentStatus, StockItem,
    StockPatch,
};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::convert::Infallible;
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{table} store operation failed: {source}")]
    Backend {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("no {table} record with key {key}")]
    NotFound { table: &'static str, key: String },
}

impl StoreError {
    pub fn not_found(table: &'static str, key: impl Display) -> Self {
        StoreError::NotFound {
            table,
            key: key.to_string(),
        }
    }
}

trait OnTable<T> {
    fn on(self, table: &'static str) -> Result<T, StoreError>;
}

impl<T> OnTable<T> for rusqlite::Result<T> {
    fn on(self, table: &'static str) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Backend { table, source })
    }
}

pub trait Record: Sized {
    const TABLE: &'static str;
    type Key: Display;
    /// Insert payload; carries everything but a generated key.
    type Draft;
    type Patch;
}

impl Record for Order {
    const TABLE: &'static str = "orders";
    type Key = i64;
    type Draft = NewOrder;
    type Patch = OrderPatch;
}

impl Record for Expense {
    const TABLE: &'static str = "expenses";
    type Key = i64;
    type Draft = NewExpense;
    // expenses are never edited
    type Patch = Infallible;
}

impl Record for StockItem {
    const TABLE: &'static str = "stock";
    type Key = String;
    type Draft = StockItem;
    type Patch = StockPatch;
}

/// Ordering and truncation applied after a scan's predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub reverse: bool,
    pub limit: Option<usize>,
}

impl ScanOptions {
    pub fn newest_first() -> Self {
        ScanOptions {
            reverse: true,
            limit: None,
        }
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    fn apply<T>(self, mut items: Vec<T>) -> Vec<T> {
        if self.reverse {
            items.reverse();
        }
        if let Some(n) = self.limit {
            items.truncate(n);
        }
        items
    }
}

pub trait RecordStore<R: Record> {
    fn get(&self, key: &R::Key) -> Result<Option<R>, StoreError>;
    fn add(&self, draft: R::Draft) -> Result<R::Key, StoreError>;
    fn update(&self, key: &R::Key, patch: R::Patch) -> Result<(), StoreError>;
    /// Full-table scan in key order, keeping records that satisfy `filter`.
    fn scan(&self, filter: &dyn Fn(&R) -> bool, opts: ScanOptions) -> Result<Vec<R>, StoreError>;

    fn all(&self) -> Result<Vec<R>, StoreError> {
        self.scan(&|_| true, ScanOptions::default())
    }
}

pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        SqliteStore { conn }
    }
}

impl ToSql for OrderStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for OrderStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

impl ToSql for PaymentStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for PaymentStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

const ORDER_COLUMNS: &str =
    "id, customer_name, address, phone, details, payment_status, status, date, timestamp";

fn order_from_row(r: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: r.get(0)?,
        customer_name: r.get(1)?,
        address: r.get(2)?,
        phone: r.get(3)?,
        details: r.get(4)?,
        payment_status: r.get(5)?,
        status: r.get(6)?,
        date: r.get(7)?,
        timestamp: r.get(8)?,
    })
}

impl RecordStore<Order> for SqliteStore<'_> {
    fn get(&self, id: &i64) -> Result<Option<Order>, StoreError> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM orders WHERE id=?1", ORDER_COLUMNS),
                params![id],
                order_from_row,
            )
            .optional()
            .on(Order::TABLE)
    }

    fn add(&self, o: NewOrder) -> Result<i64, StoreError> {
        self.conn
            .execute(
                "INSERT INTO orders(customer_name, address, phone, details, payment_status, status, date, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    o.customer_name,
                    o.address,
                    o.phone,
                    o.details,
                    o.payment_status,
                    o.status,
                    o.date,
                    o.timestamp
                ],
            )
            .on(Order::TABLE)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, id: &i64, patch: OrderPatch) -> Result<(), StoreError> {
        let changed = match patch.status {
            Some(status) => self
                .conn
                .execute(
                    "UPDATE orders SET status=?1 WHERE id=?2",
                    params![status, id],
                )
                .on(Order::TABLE)?,
            None => self
                .conn
                .query_row(
                    "SELECT COUNT(*) FROM orders WHERE id=?1",
                    params![id],
                    |r| r.get::<_, i64>(0),
                )
                .on(Order::TABLE)? as usize,
        };
        if changed == 0 {
            return Err(StoreError::not_found(Order::TABLE, id));
        }
        Ok(())
    }

    fn scan(
        &self,
        filter: &dyn Fn(&Order) -> bool,
        opts: ScanOptions,
    ) -> Result<Vec<Order>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM orders ORDER BY id", ORDER_COLUMNS))
            .on(Order::TABLE)?;
        let rows = stmt.query_map([], order_from_row).on(Order::TABLE)?;
        let mut data = Vec::new();
        for row in rows {
            let order = row.on(Order::TABLE)?;
            if filter(&order) {
                data.push(order);
            }
        }
        Ok(opts.apply(data))
    }
}

/// Amounts are stored as text; anything unreadable counts as zero.
fn lenient_amount(v: ValueRef<'_>) -> Decimal {
    match v {
        ValueRef::Text(t) => std::str::from_utf8(t)
            .ok()
            .and_then(|s| s.trim().parse::<Decimal>().ok())
            .unwrap_or(Decimal::ZERO),
        ValueRef::Integer(i) => Decimal::from(i),
        ValueRef::Real(f) => Decimal::try_from(f).unwrap_or(Decimal::ZERO),
        ValueRef::Null | ValueRef::Blob(_) => Decimal::ZERO,
    }
}

const EXPENSE_COLUMNS: &str = "id, note, amount, date, iso_month, timestamp";

fn expense_from_row(r: &Row<'_>) -> rusqlite::Result<Expense> {
    let iso_month: Option<String> = r.get(4)?;
    Ok(Expense {
        id: r.get(0)?,
        note: r.get::<_, Option<String>>(1)?.unwrap_or_default(),
        amount: lenient_amount(r.get_ref(2)?),
        date: r.get::<_, Option<String>>(3)?.unwrap_or_default(),
        iso_month: iso_month.filter(|m| !m.trim().is_empty()),
        timestamp: r.get(5)?,
    })
}

impl RecordStore<Expense> for SqliteStore<'_> {
    fn get(&self, id: &i64) -> Result<Option<Expense>, StoreError> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM expenses WHERE id=?1", EXPENSE_COLUMNS),
                params![id],
                expense_from_row,
            )
            .optional()
            .on(Expense::TABLE)
    }

    fn add(&self, e: NewExpense) -> Result<i64, StoreError> {
        self.conn
            .execute(
                "INSERT INTO expenses(note, amount, date, iso_month, timestamp) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![e.note, e.amount.to_string(), e.date, e.iso_month, e.timestamp],
            )
            .on(Expense::TABLE)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, _id: &i64, patch: Infallible) -> Result<(), StoreError> {
        match patch {}
    }

    fn scan(
        &self,
        filter: &dyn Fn(&Expense) -> bool,
        opts: ScanOptions,
    ) -> Result<Vec<Expense>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM expenses ORDER BY id", EXPENSE_COLUMNS))
            .on(Expense::TABLE)?;
        let rows = stmt.query_map([], expense_from_row).on(Expense::TABLE)?;
        let mut data = Vec::new();
        for row in rows {
            let expense = row.on(Expense::TABLE)?;
            if filter(&expense) {
                data.push(expense);
            }
        }
        Ok(opts.apply(data))
    }
}

fn stock_from_row(r: &Row<'_>) -> rusqlite::Result<StockItem> {
    Ok(StockItem {
        item_size: r.get(0)?,
        quantity: r.get(1)?,
    })
}

impl RecordStore<StockItem> for SqliteStore<'_> {
    fn get(&self, item_size: &String) -> Result<Option<StockItem>, StoreError> {
        self.conn
            .query_row(
                "SELECT item_size, quantity FROM stock WHERE item_size=?1",
                params![item_size],
                stock_from_row,
            )
            .optional()
            .on(StockItem::TABLE)
    }

    fn add(&self, item: StockItem) -> Result<String, StoreError> {
        self.conn
            .execute(
                "INSERT INTO stock(item_size, quantity) VALUES (?1, ?2)",
                params![item.item_size, item.quantity],
            )
            .on(StockItem::TABLE)?;
        Ok(item.item_size)
    }

    fn update(&self, item_size: &String, patch: StockPatch) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE stock SET quantity=?1 WHERE item_size=?2",
                params![patch.quantity, item_size],
            )
            .on(StockItem::TABLE)?;
        if changed == 0 {
            return Err(StoreError::not_found(StockItem::TABLE, item_size));
        }
        Ok(())
    }

    fn scan(
        &self,
        filter: &dyn Fn(&StockItem) -> bool,
        opts: ScanOptions,
    ) -> Result<Vec<StockItem>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT item_size, quantity FROM stock ORDER BY item_size")
            .on(StockItem::TABLE)?;
        let rows = stmt.query_map([], stock_from_row).on(StockItem::TABLE)?;
        let mut data = Vec::new();
        for row in rows {
            let item = row.on(StockItem::TABLE)?;
            if filter(&item) {
                data.push(item);
            }
        }
        Ok(opts.apply(data))
    }
}
