// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Normalizes any stored or uploaded JSON into the current [`Document`] shape.
//!
//! Old backups have no `_settings` block and no per-item colors. Those are
//! detected here and back-filled. Missing or malformed fields are defaulted
//! rather than rejected, so the only failure is a root that is not an object.
//! Running the migration on its own output yields the same document.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Category, Colors, Document, ExpenseItem, IncomeItem, InvestmentItem, Metadata, MonthLedger,
    MAX_TRANSACTION_ID, Settings, Theme, TransactionId, is_month_key,
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

const SETTINGS_KEY: &str = "_settings";
const METADATA_KEY: &str = "_metadata";

/// Documents without a `_settings` object predate settings and per-item colors.
pub fn is_legacy(raw: &Value) -> bool {
    raw.as_object().is_none_or(lacks_settings)
}

fn lacks_settings(root: &Map<String, Value>) -> bool {
    !matches!(root.get(SETTINGS_KEY), Some(Value::Object(_)))
}

pub fn migrate(raw: Value) -> LedgerResult<Document> {
    migrate_at(raw, Utc::now())
}

/// Same as [`migrate`], with the clock used for a freshly created
/// `importedAt` stamp supplied by the caller.
pub fn migrate_at(raw: Value, now: DateTime<Utc>) -> LedgerResult<Document> {
    let mut root = match raw {
        Value::Object(map) => map,
        other => {
            return Err(LedgerError::InvalidFormat(format!(
                "expected a JSON object at the root, found {}",
                json_kind(&other)
            )));
        }
    };

    let legacy = lacks_settings(&root);
    let settings = normalize_settings(root.remove(SETTINGS_KEY));
    let metadata = normalize_metadata(root.remove(METADATA_KEY), legacy, now);

    let mut next_id = raw_max_id(&root).map_or(1, |max| max.saturating_add(1));
    let mut months = BTreeMap::new();
    for (key, value) in root {
        if !is_month_key(&key) {
            debug!(key = %key, "dropping non-month key");
            continue;
        }
        let ledger = normalize_month(&key, value, legacy, &settings.colors, &mut next_id);
        months.insert(key, ledger);
    }

    debug!(legacy, months = months.len(), "migrated ledger document");
    Ok(Document {
        settings,
        metadata,
        months,
    })
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn normalize_settings(raw: Option<Value>) -> Settings {
    let mut settings = Settings::default();
    let Some(Value::Object(map)) = raw else {
        return settings;
    };
    if let Some(Value::Object(colors)) = map.get("colors") {
        for category in Category::ALL {
            if let Some(color) = non_empty_str(colors.get(category.color_key())) {
                settings.colors.set(category, color.to_string());
            }
        }
    }
    settings.theme = match map.get("theme").and_then(Value::as_str) {
        Some(t) => t.parse().unwrap_or_default(),
        None => Theme::default(),
    };
    settings
}

fn normalize_metadata(raw: Option<Value>, legacy: bool, now: DateTime<Utc>) -> Metadata {
    match raw {
        Some(Value::Object(map)) => Metadata {
            app: non_empty_str(map.get("app")).map(str::to_string),
            version: non_empty_str(map.get("version")).map(str::to_string),
            logo: non_empty_str(map.get("logo")).map(str::to_string),
            imported_at: timestamp(map.get("importedAt")),
            exported_at: timestamp(map.get("exportedAt")),
            migrated_from_old_format: map.get("migratedFromOldFormat").and_then(Value::as_bool),
        },
        _ => Metadata {
            imported_at: Some(now),
            migrated_from_old_format: Some(legacy),
            ..Metadata::app_identity()
        },
    }
}

fn normalize_month(
    key: &str,
    raw: Value,
    legacy: bool,
    colors: &Colors,
    next_id: &mut TransactionId,
) -> MonthLedger {
    let mut ledger = MonthLedger::default();
    let Value::Object(mut map) = raw else {
        warn!(month = %key, "month entry is not an object, starting it empty");
        return ledger;
    };

    for category in Category::ALL {
        let items = match map.remove(category.collection()) {
            Some(Value::Array(items)) => items,
            _ => continue,
        };
        for raw_item in items {
            let Value::Object(item) = raw_item else {
                warn!(month = %key, collection = category.collection(), "dropping malformed item");
                continue;
            };
            let id = item_id(item.get("id")).unwrap_or_else(|| {
                let id = *next_id;
                *next_id += 1;
                id
            });
            let name = text(item.get("name"));
            let value = number(item.get("value"));
            let color = non_empty_str(item.get("color"))
                .map(str::to_string)
                .or_else(|| legacy.then(|| colors.get(category).to_string()));
            match category {
                Category::Income => ledger.incomes.push(IncomeItem {
                    id,
                    name,
                    value,
                    color,
                }),
                Category::Expense => ledger.expenses.push(ExpenseItem {
                    id,
                    name,
                    planned: number(item.get("planned")),
                    value,
                    date: non_empty_str(item.get("date")).map(str::to_string),
                    color,
                }),
                Category::Investment => ledger.investments.push(InvestmentItem {
                    id,
                    name,
                    investment_type: non_empty_str(item.get("type")).map(str::to_string),
                    value,
                    date: non_empty_str(item.get("date")).map(str::to_string),
                    color,
                }),
            }
        }
    }
    ledger
}

fn raw_max_id(root: &Map<String, Value>) -> Option<TransactionId> {
    root.iter()
        .filter(|(key, _)| is_month_key(key))
        .filter_map(|(_, month)| month.as_object())
        .flat_map(|month| {
            Category::ALL
                .into_iter()
                .filter_map(|c| month.get(c.collection()).and_then(Value::as_array))
                .flatten()
        })
        .filter_map(|item| item_id(item.get("id")))
        .max()
}

fn item_id(v: Option<&Value>) -> Option<TransactionId> {
    let id = match v? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= MAX_TRANSACTION_ID as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    id.filter(|id| *id <= MAX_TRANSACTION_ID)
}

fn non_empty_str(v: Option<&Value>) -> Option<&str> {
    v.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn text(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn number(v: Option<&Value>) -> f64 {
    match v {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}

fn timestamp(v: Option<&Value>) -> Option<DateTime<Utc>> {
    let s = v?.as_str()?;
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
