// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Order-to-stock deduction.
//!
//! Order text is free-form, so matching is lenient: each non-blank line may
//! start with a quantity (`2`, `2x`, `2 *`), and the rest is matched against
//! stock names by case-insensitive substring in either direction, longest
//! name first. Lines that match nothing are skipped.

use crate::models::{StockItem, StockPatch};
use crate::store::{RecordStore, StoreError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static QTY_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\s*[xX*]?\s*").unwrap());
static QTY_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)(\s*)[xX](\s)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deduction {
    pub item_name: String,
    pub quantity_deducted: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem<'a> {
    pub quantity: u64,
    pub fragment: &'a str,
}

/// Splits a trimmed line into its leading quantity (default 1) and the
/// remaining item-name fragment. Returns `None` for blank lines. A digit
/// run too long for `u64` saturates.
pub fn parse_line(line: &str) -> Option<LineItem<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match QTY_PREFIX.captures(line) {
        Some(caps) => {
            let quantity = caps[1].parse::<u64>().unwrap_or(u64::MAX);
            let prefix_len = caps.get(0).map_or(0, |m| m.end());
            Some(LineItem {
                quantity,
                fragment: line[prefix_len..].trim(),
            })
        }
        None => Some(LineItem {
            quantity: 1,
            fragment: line,
        }),
    }
}

/// First entry whose name contains the fragment or is contained in it.
/// `catalog` must already be in preference order.
pub fn find_match(catalog: &[StockItem], fragment: &str) -> Option<usize> {
    let needle = fragment.to_lowercase();
    catalog.iter().position(|item| {
        let name = item.item_size.to_lowercase();
        needle.contains(&name) || name.contains(&needle)
    })
}

/// Deducts every matched order line from stock and reports what was taken.
///
/// Each match is written through `store` as its own update; a failing update
/// aborts the loop and leaves the earlier updates in place.
pub fn deduct<S>(
    store: &S,
    order_details: &str,
    mut stock: Vec<StockItem>,
) -> Result<Vec<Deduction>, StoreError>
where
    S: RecordStore<StockItem> + ?Sized,
{
    // stable: equal-length names keep store order
    stock.sort_by_key(|item| std::cmp::Reverse(item.item_size.chars().count()));

    let mut deductions = Vec::new();
    for line in order_details.split('\n') {
        let Some(parsed) = parse_line(line) else {
            continue;
        };
        let Some(idx) = find_match(&stock, parsed.fragment) else {
            tracing::debug!(line = line.trim(), "no stock item matches order line");
            continue;
        };
        let item = &mut stock[idx];
        let new_qty =
            u32::try_from(parsed.quantity).map_or(0, |q| item.quantity.saturating_sub(q));
        store.update(&item.item_size, StockPatch { quantity: new_qty })?;
        tracing::info!(
            item = %item.item_size,
            deducted = parsed.quantity,
            remaining = new_qty,
            "stock deducted"
        );
        item.quantity = new_qty;
        deductions.push(Deduction {
            item_name: item.item_size.clone(),
            quantity_deducted: parsed.quantity,
        });
    }
    Ok(deductions)
}

pub fn summarize(deductions: &[Deduction]) -> String {
    if deductions.is_empty() {
        return "No matching stock items found to deduct".to_string();
    }
    let mut out = String::from("Stock updated:");
    for d in deductions {
        out.push_str(&format!("\n{}x {}", d.quantity_deducted, d.item_name));
    }
    out
}

/// Rewrites `2 x ` style multipliers to `2 * `. An `x` not followed by
/// whitespace (`12x12`) is left alone.
pub fn normalize_quantity_markers(text: &str) -> String {
    QTY_MARKER.replace_all(text, "$1$2*$3").into_owned()
}
