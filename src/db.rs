// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerResult;
use crate::models::Document;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.fintec", "FinTec Pro", "fintec"));

/// Key of the whole-document blob.
pub const STORAGE_KEY: &str = "finData";

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("fintec.sqlite"))
}

pub fn open_at(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> LedgerResult<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS storage(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

/// Reads the stored document as raw JSON, `None` when nothing was saved yet.
/// The result still has to go through the migrator.
pub fn load(conn: &Connection) -> LedgerResult<Option<Value>> {
    let blob: Option<String> = conn
        .query_row(
            "SELECT value FROM storage WHERE key=?1",
            params![STORAGE_KEY],
            |r| r.get(0),
        )
        .optional()?;
    match blob {
        Some(s) => Ok(Some(serde_json::from_str(&s)?)),
        None => Ok(None),
    }
}

pub fn save(conn: &Connection, doc: &Document) -> LedgerResult<()> {
    let blob = serde_json::to_string(doc)?;
    conn.execute(
        "INSERT INTO storage(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![STORAGE_KEY, blob],
    )?;
    debug!(bytes = blob.len(), "saved ledger document");
    Ok(())
}
