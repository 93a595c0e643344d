// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Datelike, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const NO_NAME: &str = "Customer (No Name)";
pub const SEE_DETAILS: &str = "See Details";
const CUSTOMER_NAME_MAX: usize = 30;

#[derive(Debug, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    NotPaid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::NotPaid => "NotPaid",
        }
    }

    /// Label used on slips and lists.
    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "PAID",
            PaymentStatus::NotPaid => "NOT PAID",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "notpaid" | "not-paid" | "not paid" => Ok(PaymentStatus::NotPaid),
            _ => Err(ParseEnumError {
                kind: "payment status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            _ => Err(ParseEnumError {
                kind: "order status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    pub details: String,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub date: String,
    pub timestamp: i64, // ms since epoch
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    pub details: String,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub date: String,
    pub timestamp: i64,
}

impl NewOrder {
    /// Builds a pending order from the free-text block. The first line names
    /// the customer; everything else stays in `details`.
    pub fn from_details(details: &str, payment_status: PaymentStatus, now: DateTime<Local>) -> Self {
        let details = details.trim().to_string();
        let customer_name = match details.lines().next().map(str::trim) {
            Some(first) if !first.is_empty() => first.chars().take(CUSTOMER_NAME_MAX).collect(),
            _ => NO_NAME.to_string(),
        };
        NewOrder {
            customer_name,
            address: SEE_DETAILS.to_string(),
            phone: SEE_DETAILS.to_string(),
            details,
            payment_status,
            status: OrderStatus::Pending,
            date: display_date(now),
            timestamp: now.timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
}

impl OrderPatch {
    pub fn status(status: OrderStatus) -> Self {
        OrderPatch {
            status: Some(status),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub note: String,
    pub amount: Decimal,
    pub date: String,
    pub iso_month: Option<String>, // YYYY-MM, absent on legacy rows
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub note: String,
    pub amount: Decimal,
    pub date: String,
    pub iso_month: String,
    pub timestamp: i64,
}

impl NewExpense {
    pub fn new(note: &str, amount: Decimal, now: DateTime<Local>) -> Self {
        NewExpense {
            note: note.to_string(),
            amount,
            date: display_date(now),
            iso_month: format!("{}-{:02}", now.year(), now.month()),
            timestamp: now.timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub item_size: String,
    pub quantity: u32,
}

impl StockItem {
    pub fn new(item_size: impl Into<String>, quantity: u32) -> Self {
        StockItem {
            item_size: item_size.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockPatch {
    pub quantity: u32,
}

pub fn display_date(now: DateTime<Local>) -> String {
    now.format("%d/%m/%Y").to_string()
}
