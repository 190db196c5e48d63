// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Session;
use crate::models::{Category, Transaction};
use crate::store::{TransactionForm, TransactionPatch};
use crate::utils::{format_currency, format_date, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Result, anyhow};
use serde::Serialize;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("remove", sub)) => remove(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn kind(sub: &clap::ArgMatches) -> Result<Category> {
    sub.get_one::<String>("kind")
        .unwrap()
        .parse()
        .map_err(|e: String| anyhow!(e))
}

fn text(sub: &clap::ArgMatches, id: &str) -> String {
    sub.get_one::<String>(id).cloned().unwrap_or_default()
}

pub fn form_from(sub: &clap::ArgMatches) -> TransactionForm {
    TransactionForm {
        name: text(sub, "name"),
        value: text(sub, "value"),
        planned: text(sub, "planned"),
        date: text(sub, "date"),
        investment_type: text(sub, "type"),
        color: sub.get_one::<String>("color").cloned(),
    }
}

/// Only the flags actually passed count as provided fields.
pub fn patch_from(sub: &clap::ArgMatches) -> TransactionPatch {
    let amount = |id: &str| {
        sub.get_one::<String>(id)
            .map(|s| parse_amount(s).unwrap_or(f64::NAN))
    };
    TransactionPatch {
        name: sub.get_one::<String>("name").cloned(),
        value: amount("value"),
        planned: amount("planned"),
        date: sub.get_one::<String>("date").cloned(),
        investment_type: sub.get_one::<String>("type").cloned(),
        color: sub.get_one::<String>("color").cloned(),
    }
}

fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    super::select_month(session, sub)?;
    let category = kind(sub)?;
    let item = session.add_transaction(category, &form_from(sub))?;
    println!(
        "Recorded {} '{}' of {} in {} (id {})",
        category,
        item.name(),
        format_currency(item.value()),
        session.active_month(),
        item.id()
    );
    Ok(())
}

fn remove(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    super::select_month(session, sub)?;
    let category = kind(sub)?;
    let id = *sub.get_one::<u64>("id").unwrap();
    if session.remove_transaction(category, id) {
        println!("Removed {} {}", category, id);
    } else {
        println!("No {} with id {} in {}", category, id, session.active_month());
    }
    Ok(())
}

fn edit(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    super::select_month(session, sub)?;
    let category = kind(sub)?;
    let id = *sub.get_one::<u64>("id").unwrap();
    session.edit_transaction(category, id);
    if session.save_edit(category, id, &patch_from(sub)) {
        if let Some(item) = session.active_ledger().and_then(|m| m.find(category, id)) {
            println!(
                "Updated {} '{}' to {} (id {})",
                category,
                item.name(),
                format_currency(item.value()),
                id
            );
        }
    } else {
        session.cancel_edit();
        println!("No {} with id {} in {}", category, id, session.active_month());
    }
    Ok(())
}

fn list(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    super::select_month(session, sub)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let only = match sub.get_one::<String>("kind") {
        Some(k) => Some(k.parse::<Category>().map_err(|e| anyhow!(e))?),
        None => None,
    };
    let data = query_rows(session, only);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.kind.clone(),
                    r.name.clone(),
                    format_currency(r.value),
                    r.planned.map(format_currency).unwrap_or_default(),
                    r.investment_type.clone().unwrap_or_default(),
                    if r.kind == "income" {
                        String::new()
                    } else {
                        format_date(r.date.as_deref())
                    },
                    r.color.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Kind", "Name", "Value", "Planned", "Type", "Date", "Color"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: u64,
    pub kind: String,
    pub name: String,
    pub value: f64,
    pub planned: Option<f64>,
    #[serde(rename = "type")]
    pub investment_type: Option<String>,
    pub date: Option<String>,
    /// Item color, or the category color when the item has none.
    pub color: String,
}

/// Rows of the active month, incomes first, each category in insertion order.
pub fn query_rows(session: &Session, only: Option<Category>) -> Vec<TransactionRow> {
    let Some(month) = session.active_ledger() else {
        return Vec::new();
    };
    let colors = &session.document().settings.colors;
    Category::ALL
        .into_iter()
        .filter(|c| only.is_none_or(|o| o == *c))
        .flat_map(|c| month.items(c))
        .map(|item| {
            let color = item
                .color()
                .unwrap_or(colors.get(item.category()))
                .to_string();
            let (planned, investment_type, date) = match &item {
                Transaction::Income(_) => (None, None, None),
                Transaction::Expense(e) => (Some(e.planned), None, e.date.clone()),
                Transaction::Investment(v) => (None, v.investment_type.clone(), v.date.clone()),
            };
            TransactionRow {
                id: item.id(),
                kind: item.category().to_string(),
                name: item.name().to_string(),
                value: item.value(),
                planned,
                investment_type,
                date,
                color,
            }
        })
        .collect()
}
