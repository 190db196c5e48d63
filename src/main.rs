// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use fintec::{app::Session, cli, commands, db, utils};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = match matches.get_one::<String>("db") {
        Some(p) => PathBuf::from(p),
        None => db::db_path()?,
    };
    let conn = db::open_at(&path)?;
    let mut session = Session::init(conn, &utils::current_month())?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Ledger initialized at {}", path.display());
        }
        Some(("summary", sub)) => commands::summary::handle(&mut session, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut session, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut session, sub)?,
        Some(("backup", sub)) => commands::backup::handle(&mut session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&mut session, sub)?,
        Some(("save", _)) => {
            if let Some(msg) = session.save_local(false)? {
                println!("{}", msg);
            }
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
