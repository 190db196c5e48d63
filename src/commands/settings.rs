// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Session;
use crate::models::{Category, Theme};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(session, sub)?,
        Some(("color", sub)) => color(session, sub)?,
        Some(("theme", sub)) => theme(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let settings = &session.document().settings;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), settings)? {
        let mut rows: Vec<Vec<String>> = Category::ALL
            .into_iter()
            .map(|c| vec![c.color_key().to_string(), settings.colors.get(c).to_string()])
            .collect();
        rows.push(vec!["theme".into(), settings.theme.to_string()]);
        println!("{}", pretty_table(&["Setting", "Value"], rows));
    }
    Ok(())
}

fn color(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let category: Category = sub
        .get_one::<String>("category")
        .unwrap()
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let value = sub.get_one::<String>("value").unwrap();
    session.set_color(category, value)?;
    println!("Color for {} set to {}", category, value.trim());
    Ok(())
}

fn theme(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let theme: Theme = sub
        .get_one::<String>("theme")
        .unwrap()
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    session.set_theme(theme);
    println!("Theme set to {}", theme);
    Ok(())
}
