// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

pub const DEFAULT_SHOP_NAME: &str = "Amazing Decora";
pub const DEFAULT_CURRENCY: &str = "LKR";

const SHOP_NAME_KEY: &str = "shop_name";
const CURRENCY_KEY: &str = "currency";

/// Shop-wide settings kept in the `settings` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub shop_name: String,
    pub currency: String,
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        Ok(Settings {
            shop_name: get(conn, SHOP_NAME_KEY)?.unwrap_or_else(|| DEFAULT_SHOP_NAME.to_string()),
            currency: get(conn, CURRENCY_KEY)?.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        })
    }
}

fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn set_shop_name(conn: &Connection, name: &str) -> Result<()> {
    set(conn, SHOP_NAME_KEY, name)
}

pub fn set_currency(conn: &Connection, ccy: &str) -> Result<()> {
    set(conn, CURRENCY_KEY, &ccy.to_uppercase())
}
