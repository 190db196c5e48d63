// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Session;
use crate::commands::transactions::query_rows;
use anyhow::{Result, bail};
use serde_json::json;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(session, sub),
        _ => Ok(()),
    }
}

fn export_transactions(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    super::select_month(session, sub)?;
    let month = session.active_month().to_string();
    let rows = query_rows(session, None);

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "month", "kind", "id", "name", "value", "planned", "type", "date", "color",
            ])?;
            for r in rows {
                wtr.write_record([
                    month.clone(),
                    r.kind,
                    r.id.to_string(),
                    r.name,
                    r.value.to_string(),
                    r.planned.map(|p| p.to_string()).unwrap_or_default(),
                    r.investment_type.unwrap_or_default(),
                    r.date.unwrap_or_default(),
                    r.color,
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = rows
                .into_iter()
                .map(|r| {
                    json!({
                        "month": month, "kind": r.kind, "id": r.id, "name": r.name,
                        "value": r.value, "planned": r.planned, "type": r.investment_type,
                        "date": r.date, "color": r.color
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
