// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerResult;
use crate::migrate::{is_legacy, migrate};
use crate::models::Document;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// A serialized backup ready to be written under its own name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Backup {
    pub fn write_to(&self, dir: &Path) -> LedgerResult<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), "wrote backup");
        Ok(path)
    }
}

pub fn backup_file_name(date: NaiveDate) -> String {
    format!("FinTec-Pro-Backup-{}.json", date.format("%Y-%m-%d"))
}

pub fn export_backup(doc: &Document) -> LedgerResult<Backup> {
    export_backup_at(doc, Utc::now())
}

/// Pretty-printed copy of `doc` stamped with the app identity and `now`.
/// `doc` itself is left untouched.
pub fn export_backup_at(doc: &Document, now: DateTime<Utc>) -> LedgerResult<Backup> {
    let mut copy = doc.clone();
    copy.metadata.stamp_export(now);
    Ok(Backup {
        file_name: backup_file_name(now.date_naive()),
        bytes: serde_json::to_vec_pretty(&copy)?,
    })
}

/// A parsed backup, with whether it had to be upgraded from the legacy format.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedBackup {
    pub document: Document,
    pub legacy: bool,
}

/// Parses and migrates a backup file.
pub fn import_backup(bytes: &[u8]) -> LedgerResult<Document> {
    Ok(read_backup(bytes)?.document)
}

pub fn read_backup(bytes: &[u8]) -> LedgerResult<ImportedBackup> {
    let raw: Value = serde_json::from_slice(bytes)?;
    let legacy = is_legacy(&raw);
    let document = migrate(raw)?;
    info!(months = document.months.len(), legacy, "imported backup");
    Ok(ImportedBackup { document, legacy })
}
