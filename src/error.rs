// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub const INVALID_INPUT: &str = "Dados inválidos";
pub const INVALID_EXPENSE_INPUT: &str = "Dados inválidos. Preencha Nome e Valor Real.";

/// Errors raised by the ledger core.
///
/// Every variant is handled at the boundary of the operation that produced
/// it; none of them leave the document partially modified.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// User-entered data was rejected before anything was created.
    #[error("{0}")]
    Validation(String),

    /// A backup file or stored blob is not valid JSON.
    #[error("Erro ao processar arquivo. Verifique se é um arquivo JSON válido. ({0})")]
    Parse(#[from] serde_json::Error),

    /// The JSON was well formed but cannot be a ledger document.
    #[error("invalid document format: {0}")]
    InvalidFormat(String),

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    /// Writing to or reading from the durable store failed.
    #[error("storage error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
