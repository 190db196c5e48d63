// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Session;
use anyhow::{Context, Result};
use std::path::Path;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("export", sub)) => export(session, sub),
        Some(("import", sub)) => import(session, sub),
        _ => Ok(()),
    }
}

fn export(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let dir = Path::new(sub.get_one::<String>("out").unwrap().trim());
    let backup = session.download_data()?;
    let path = backup
        .write_to(dir)
        .with_context(|| format!("Write backup into {}", dir.display()))?;
    println!("Backup written to {}", path.display());
    Ok(())
}

fn import(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let path = Path::new(sub.get_one::<String>("path").unwrap().trim());
    let outcome = session
        .upload_file(path)
        .with_context(|| format!("Import backup {}", path.display()))?;
    println!("{}", outcome.message());
    if !outcome.persisted {
        eprintln!("Warning: the imported data could not be saved locally");
    }
    Ok(())
}
