// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Session;
use crate::summary::Summary;
use crate::utils::{format_currency, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    super::select_month(session, sub)?;
    let summary = session.render().clone();
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }

    let balance_color = summary.balance_color(&session.document().settings).to_string();
    println!("{}", session.active_month());
    println!(
        "{}",
        pretty_table(
            &["Entradas", "Despesas", "Investimentos", "Saldo"],
            vec![vec![
                format_currency(summary.total_income),
                format_currency(summary.total_expense),
                format_currency(summary.total_invest),
                format!("{} ({})", format_currency(summary.balance), balance_color),
            ]],
        )
    );
    println!("{}", pretty_table(&["Fatia", "Valor", "Cor"], pie_rows(&summary)));
    Ok(())
}

fn pie_rows(summary: &Summary) -> Vec<Vec<String>> {
    summary
        .pie_series
        .iter()
        .map(|s| vec![s.label.clone(), format_currency(s.value), s.color.clone()])
        .collect()
}
