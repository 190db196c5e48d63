// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The operations a presentation layer drives: one [`Session`] per running
//! app, owning the storage connection and the ledger.

use crate::backup::{self, Backup};
use crate::db;
use crate::error::LedgerResult;
use crate::migrate::migrate;
use crate::models::{Category, Document, MonthLedger, Theme, Transaction, TransactionId};
use crate::store::{EditTarget, LedgerStore, TransactionForm, TransactionPatch};
use crate::summary::{Summary, summarize};
use rusqlite::Connection;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{info, warn};

pub const SAVED_MESSAGE: &str = "Dados salvos localmente!";
pub const IMPORTED_MIGRATED_MESSAGE: &str =
    "✓ Backup importado com sucesso!\n\nDados foram atualizados para o novo formato automaticamente.";
pub const RESTORED_MESSAGE: &str = "✓ Backup restaurado com sucesso!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    /// The backup was in the legacy format and got upgraded.
    pub migrated: bool,
    /// The imported document reached durable storage.
    pub persisted: bool,
}

impl ImportOutcome {
    pub fn message(&self) -> &'static str {
        if self.migrated {
            IMPORTED_MIGRATED_MESSAGE
        } else {
            RESTORED_MESSAGE
        }
    }
}

pub struct Session {
    conn: Connection,
    store: LedgerStore,
    summary: Summary,
}

impl Session {
    /// Loads whatever is stored (or nothing), migrates it and renders
    /// `month`. The migrated form is written back on that first render.
    pub fn init(conn: Connection, month: &str) -> LedgerResult<Self> {
        db::init_schema(&conn)?;
        let raw = db::load(&conn)?.unwrap_or_else(|| Value::Object(Map::new()));
        let document = migrate(raw)?;
        let mut store = LedgerStore::new(document, month)?;
        store.mark_dirty();
        let mut session = Self {
            conn,
            store,
            summary: Summary::default(),
        };
        session.render();
        Ok(session)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn document(&self) -> &Document {
        self.store.document()
    }

    pub fn active_month(&self) -> &str {
        self.store.active_month()
    }

    pub fn active_ledger(&self) -> Option<&MonthLedger> {
        self.store.active_ledger()
    }

    pub fn editing(&self) -> Option<EditTarget> {
        self.store.editing()
    }

    /// Last computed summary of the active month.
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn select_month(&mut self, key: &str) -> LedgerResult<&Summary> {
        self.store.select_month(key)?;
        Ok(self.render())
    }

    pub fn ensure_month_exists(&mut self) {
        self.store.ensure_active_month();
    }

    pub fn add_transaction(
        &mut self,
        category: Category,
        form: &TransactionForm,
    ) -> LedgerResult<Transaction> {
        self.ensure_month_exists();
        let item = self.store.add_transaction(category, form)?;
        self.render();
        Ok(item)
    }

    pub fn remove_transaction(&mut self, category: Category, id: TransactionId) -> bool {
        let removed = self.store.remove_transaction(category, id);
        self.render();
        removed
    }

    /// Enters edit mode for one item.
    pub fn edit_transaction(&mut self, category: Category, id: TransactionId) {
        self.store.begin_edit(category, id);
        self.render();
    }

    pub fn save_edit(
        &mut self,
        category: Category,
        id: TransactionId,
        patch: &TransactionPatch,
    ) -> bool {
        let found = self.store.save_edit(category, id, patch);
        if found {
            self.render();
        }
        found
    }

    pub fn cancel_edit(&mut self) {
        self.store.cancel_edit();
        self.render();
    }

    pub fn set_color(&mut self, category: Category, color: &str) -> LedgerResult<()> {
        self.store.set_color(category, color)?;
        self.render();
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.store.set_theme(theme);
        self.render();
    }

    /// Recomputes the active month's summary, then flushes any pending
    /// persist intent. A failed autosave is logged, never returned.
    pub fn render(&mut self) -> &Summary {
        self.store.ensure_active_month();
        if let Some(month) = self.store.active_ledger() {
            self.summary = summarize(month, &self.store.document().settings);
        }
        if self.store.take_persist_intent() {
            if let Err(err) = db::save(&self.conn, self.store.document()) {
                warn!(error = %err, "autosave failed");
            }
        }
        &self.summary
    }

    /// Writes the document. Returns the confirmation to show when not silent.
    /// A silent save only logs a failure; a visible one returns it.
    pub fn save_local(&mut self, silent: bool) -> LedgerResult<Option<&'static str>> {
        if silent {
            self.store.take_persist_intent();
            if let Err(err) = db::save(&self.conn, self.store.document()) {
                warn!(error = %err, "silent save failed");
            }
            return Ok(None);
        }
        db::save(&self.conn, self.store.document())?;
        self.store.take_persist_intent();
        info!(month = %self.store.active_month(), "saved ledger locally");
        Ok(Some(SAVED_MESSAGE))
    }

    pub fn download_data(&self) -> LedgerResult<Backup> {
        backup::export_backup(self.store.document())
    }

    /// Replaces the ledger with an uploaded backup. A malformed file leaves
    /// the session untouched.
    pub fn upload_data(&mut self, bytes: &[u8]) -> LedgerResult<ImportOutcome> {
        let imported = backup::read_backup(bytes)?;
        let migrated = imported.legacy;
        self.store.replace_document(imported.document);
        let persisted = match self.save_local(false) {
            Ok(_) => true,
            Err(err) => {
                warn!(error = %err, "imported backup could not be saved");
                false
            }
        };
        self.render();
        Ok(ImportOutcome {
            migrated,
            persisted,
        })
    }

    pub fn upload_file(&mut self, path: &Path) -> LedgerResult<ImportOutcome> {
        let bytes = std::fs::read(path)?;
        self.upload_data(&bytes)
    }
}
