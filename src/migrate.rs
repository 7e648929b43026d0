// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Load-time rewrites of stored records that predate the current schema.
//!
//! Each migration sees one raw JSON record and reports whether it changed it.
//! They run before typed parsing, so legacy values never reach the models.

use serde_json::{Map, Value};

use crate::models::GoalIcon;

pub type Migration = fn(&mut Map<String, Value>) -> bool;

pub const TRANSACTION_MIGRATIONS: &[Migration] = &[collapse_legacy_wallet];

pub const GOAL_MIGRATIONS: &[Migration] = &[map_legacy_goal_icon];

/// Run `migrations` over every object in a JSON array. Returns how many
/// records were rewritten. Non-array input is left for the parser to reject.
pub fn apply(records: &mut Value, migrations: &[Migration]) -> usize {
    let Some(items) = records.as_array_mut() else {
        return 0;
    };
    let mut touched = 0;
    for item in items.iter_mut() {
        if let Some(obj) = item.as_object_mut() {
            let mut changed = false;
            for m in migrations {
                changed |= m(obj);
            }
            if changed {
                touched += 1;
            }
        }
    }
    touched
}

/// `card`, `upi` and anything unrecognised become `bank`; only `cash` stays.
pub fn collapse_legacy_wallet(record: &mut Map<String, Value>) -> bool {
    let current = record.get("wallet").and_then(Value::as_str);
    let normalized = match current {
        Some("cash") => "cash",
        _ => "bank",
    };
    if current == Some(normalized) {
        return false;
    }
    record.insert("wallet".into(), Value::String(normalized.into()));
    true
}

/// Early builds stored emoji instead of icon keys.
pub fn map_legacy_goal_icon(record: &mut Map<String, Value>) -> bool {
    let current = record.get("icon").and_then(Value::as_str);
    if current.is_some_and(|s| s.parse::<GoalIcon>().is_ok()) {
        return false;
    }
    let icon = match current {
        Some(s) if s.starts_with('\u{2708}') => GoalIcon::Travel,
        Some(s) if s.starts_with('\u{1F4BB}') => GoalIcon::Tech,
        _ => GoalIcon::Target,
    };
    record.insert("icon".into(), Value::String(icon.key().into()));
    true
}
