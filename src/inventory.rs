// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{StockItem, StockPatch};
use crate::store::{RecordStore, StoreError};

/// Items the workshop produces; seeded with zero stock on first run.
pub const CATALOG: &[&str] = &[
    "Wood Pole 1.5ft",
    "Wood Pole 2.0ft",
    "Wood Pole 2.5ft",
    "Wood Pole 3.0ft",
    "Wood Pole 3.5ft",
    "Wood Pole 4.0ft",
    "PVC Pole 1.5ft",
    "PVC Pole 2.0ft",
    "PVC Pole 2.5ft",
    "PVC Pole 3.0ft",
    "PVC Pole 3.5ft",
    "PVC Pole 4.0ft",
    "Ladder 3.0ft",
    "Ladder 4.0ft",
    "Coir Pot Size 1",
    "Coir Pot Size 2",
    "Coir Pot Size 3",
    "Orchid Support 12x12",
    "Orchid Support 12x14",
];

pub fn seed_catalog<S>(store: &S) -> Result<usize, StoreError>
where
    S: RecordStore<StockItem> + ?Sized,
{
    let mut added = 0;
    for name in CATALOG {
        if store.get(&name.to_string())?.is_none() {
            store.add(StockItem::new(*name, 0))?;
            added += 1;
        }
    }
    if added > 0 {
        tracing::info!(added, "seeded stock catalog");
    }
    Ok(added)
}

/// Parses `Name=qty`. The quantity is lenient: anything unparsable reads as 0.
pub fn parse_production_entry(raw: &str) -> Option<(String, i64)> {
    let (name, qty) = raw.rsplit_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let qty = qty.trim().parse::<i64>().unwrap_or(0);
    Some((name.to_string(), qty))
}

/// Adds produced quantities to existing stock items. Non-positive quantities
/// and unknown items are skipped; the applied additions are returned.
pub fn record_production<S>(
    store: &S,
    entries: &[(String, i64)],
) -> Result<Vec<(String, u32)>, StoreError>
where
    S: RecordStore<StockItem> + ?Sized,
{
    let mut applied = Vec::new();
    for (name, qty) in entries {
        if *qty <= 0 {
            continue;
        }
        let Some(item) = store.get(name)? else {
            tracing::warn!(item = %name, "production entry for unknown stock item skipped");
            continue;
        };
        let add = u32::try_from(*qty).unwrap_or(u32::MAX);
        let quantity = item.quantity.saturating_add(add);
        store.update(&item.item_size, StockPatch { quantity })?;
        tracing::info!(item = %item.item_size, added = add, quantity, "production recorded");
        applied.push((item.item_size, add));
    }
    Ok(applied)
}
