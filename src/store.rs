// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{INVALID_EXPENSE_INPUT, INVALID_INPUT, LedgerError, LedgerResult};
use crate::models::{
    Category, Document, ExpenseItem, IncomeItem, InvestmentItem, MonthLedger, Theme, Transaction,
    TransactionId, is_month_key,
};
use crate::utils::{parse_amount, parse_date};
use chrono::Utc;
use tracing::debug;

/// Hands out transaction ids. Ids follow the wall clock in milliseconds but
/// never repeat or go backwards, even for inserts within the same millisecond.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: TransactionId,
}

impl IdGenerator {
    pub fn seeded(document: &Document) -> Self {
        Self {
            last: document.max_id().unwrap_or(0),
        }
    }

    pub fn next_at(&mut self, now_ms: TransactionId) -> TransactionId {
        let id = now_ms.max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    pub fn next_id(&mut self) -> TransactionId {
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.next_at(now_ms)
    }
}

/// Raw text of an add form, as extracted by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct TransactionForm {
    pub name: String,
    pub value: String,
    /// Expenses only.
    pub planned: String,
    /// Expenses and investments.
    pub date: String,
    /// Investments only.
    pub investment_type: String,
    /// Falls back to the category color when absent.
    pub color: Option<String>,
}

/// Fields of an edit. `None` means the field was not offered at all.
///
/// A provided value that is blank, zero or not a number leaves the stored
/// field unchanged, so an edit can never clear a name or zero an amount.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub planned: Option<f64>,
    pub date: Option<String>,
    pub investment_type: Option<String>,
    pub color: Option<String>,
}

impl TransactionPatch {
    /// Builds a patch from edit-form text. Every field of the form counts as
    /// provided; unparsable amounts become NaN and are ignored on apply.
    pub fn from_form(form: &TransactionForm) -> Self {
        let amount = |s: &str| Some(parse_amount(s).unwrap_or(f64::NAN));
        Self {
            name: Some(form.name.clone()),
            value: amount(&form.value),
            planned: amount(&form.planned),
            date: Some(form.date.clone()),
            investment_type: Some(form.investment_type.clone()),
            color: form.color.clone(),
        }
    }
}

fn provided_text(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn provided_amount(v: Option<f64>) -> Option<f64> {
    v.filter(|a| a.is_finite() && *a != 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditTarget {
    pub category: Category,
    pub id: TransactionId,
}

/// Owns the ledger document, the active month and the edit mode.
///
/// Every mutation raises a persist intent; whoever owns the store decides
/// when to flush it to durable storage.
#[derive(Debug)]
pub struct LedgerStore {
    document: Document,
    active_month: String,
    editing: Option<EditTarget>,
    ids: IdGenerator,
    persist_pending: bool,
}

impl LedgerStore {
    pub fn new(document: Document, active_month: &str) -> LedgerResult<Self> {
        let active_month = crate::utils::parse_month(active_month)?;
        let ids = IdGenerator::seeded(&document);
        Ok(Self {
            document,
            active_month,
            editing: None,
            ids,
            persist_pending: false,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn active_month(&self) -> &str {
        &self.active_month
    }

    pub fn editing(&self) -> Option<EditTarget> {
        self.editing
    }

    /// Switches the active month. Leaves edit mode.
    pub fn select_month(&mut self, key: &str) -> LedgerResult<()> {
        self.active_month = crate::utils::parse_month(key)?;
        self.editing = None;
        Ok(())
    }

    pub fn active_ledger(&self) -> Option<&MonthLedger> {
        self.document.month(&self.active_month)
    }

    pub fn ensure_month(&mut self, key: &str) -> LedgerResult<&mut MonthLedger> {
        if !is_month_key(key) {
            return Err(LedgerError::InvalidMonth(key.to_string()));
        }
        if !self.document.months.contains_key(key) {
            debug!(month = %key, "creating empty month");
            self.persist_pending = true;
        }
        Ok(self.document.months.entry(key.to_string()).or_default())
    }

    pub fn ensure_active_month(&mut self) -> &mut MonthLedger {
        if !self.document.months.contains_key(&self.active_month) {
            debug!(month = %self.active_month, "creating empty month");
            self.persist_pending = true;
        }
        self.document
            .months
            .entry(self.active_month.clone())
            .or_default()
    }

    /// Validates the form and appends a new item to the active month.
    pub fn add_transaction(
        &mut self,
        category: Category,
        form: &TransactionForm,
    ) -> LedgerResult<Transaction> {
        let invalid = || {
            let msg = match category {
                Category::Expense => INVALID_EXPENSE_INPUT,
                Category::Income | Category::Investment => INVALID_INPUT,
            };
            LedgerError::Validation(msg.to_string())
        };

        let name = form.name.trim();
        let value = parse_amount(&form.value);
        let (false, Some(value)) = (name.is_empty(), value) else {
            return Err(invalid());
        };
        let date = match form.date.trim() {
            "" => None,
            d if category != Category::Income => {
                parse_date(d).ok_or_else(invalid)?;
                Some(d.to_string())
            }
            _ => None,
        };
        let color = provided_text(&form.color)
            .unwrap_or_else(|| self.document.settings.colors.get(category).to_string());

        let id = self.ids.next_id();
        let name = name.to_string();
        let item = match category {
            Category::Income => Transaction::Income(IncomeItem {
                id,
                name,
                value,
                color: Some(color),
            }),
            Category::Expense => Transaction::Expense(ExpenseItem {
                id,
                name,
                planned: parse_amount(&form.planned)
                    .filter(|p| *p >= 0.0)
                    .unwrap_or(0.0),
                value,
                date,
                color: Some(color),
            }),
            Category::Investment => Transaction::Investment(InvestmentItem {
                id,
                name,
                investment_type: Some(form.investment_type.trim())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
                value,
                date,
                color: Some(color),
            }),
        };

        self.ensure_active_month().push(item.clone());
        self.persist_pending = true;
        debug!(month = %self.active_month, category = %category, id, "added transaction");
        Ok(item)
    }

    /// Removes the item with `id` from the active month. Missing ids are a no-op.
    pub fn remove_transaction(&mut self, category: Category, id: TransactionId) -> bool {
        let removed = self
            .document
            .months
            .get_mut(&self.active_month)
            .is_some_and(|m| m.remove(category, id));
        if removed {
            self.persist_pending = true;
            if self.editing == Some(EditTarget { category, id }) {
                self.editing = None;
            }
        }
        removed
    }

    /// Applies `patch` to the item with `id` in the active month. Returns
    /// `false` when the item does not exist.
    pub fn update_transaction(
        &mut self,
        category: Category,
        id: TransactionId,
        patch: &TransactionPatch,
    ) -> bool {
        let Some(month) = self.document.months.get_mut(&self.active_month) else {
            return false;
        };
        let name = provided_text(&patch.name);
        let value = provided_amount(patch.value);
        let color = provided_text(&patch.color);
        let date = provided_text(&patch.date).filter(|d| parse_date(d).is_some());

        let found = match category {
            Category::Income => month.incomes.iter_mut().find(|i| i.id == id).map(|item| {
                overwrite(&mut item.name, name);
                overwrite(&mut item.value, value);
                overwrite_opt(&mut item.color, color);
            }),
            Category::Expense => month.expenses.iter_mut().find(|e| e.id == id).map(|item| {
                overwrite(&mut item.name, name);
                overwrite(&mut item.planned, provided_amount(patch.planned));
                overwrite(&mut item.value, value);
                overwrite_opt(&mut item.date, date);
                overwrite_opt(&mut item.color, color);
            }),
            Category::Investment => {
                month.investments.iter_mut().find(|v| v.id == id).map(|item| {
                    overwrite(&mut item.name, name);
                    overwrite_opt(&mut item.investment_type, provided_text(&patch.investment_type));
                    overwrite(&mut item.value, value);
                    overwrite_opt(&mut item.date, date);
                    overwrite_opt(&mut item.color, color);
                })
            }
        }
        .is_some();

        if found {
            self.persist_pending = true;
        }
        found
    }

    pub fn begin_edit(&mut self, category: Category, id: TransactionId) {
        self.editing = Some(EditTarget { category, id });
    }

    /// Applies the edit and leaves edit mode. An unknown item leaves
    /// everything, edit mode included, as it was.
    pub fn save_edit(
        &mut self,
        category: Category,
        id: TransactionId,
        patch: &TransactionPatch,
    ) -> bool {
        let found = self.update_transaction(category, id, patch);
        if found {
            self.editing = None;
        }
        found
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn set_color(&mut self, category: Category, color: &str) -> LedgerResult<()> {
        let color = color.trim();
        if color.is_empty() {
            return Err(LedgerError::Validation(INVALID_INPUT.to_string()));
        }
        self.document.settings.colors.set(category, color.to_string());
        self.persist_pending = true;
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.document.settings.theme = theme;
        self.persist_pending = true;
    }

    /// Swaps in a freshly imported document.
    pub fn replace_document(&mut self, document: Document) {
        self.ids = IdGenerator::seeded(&document);
        self.document = document;
        self.editing = None;
        self.persist_pending = true;
    }

    pub fn mark_dirty(&mut self) {
        self.persist_pending = true;
    }

    /// Returns and clears the pending persist intent.
    pub fn take_persist_intent(&mut self) -> bool {
        std::mem::take(&mut self.persist_pending)
    }
}

fn overwrite<T>(field: &mut T, new: Option<T>) {
    if let Some(v) = new {
        *field = v;
    }
}

fn overwrite_opt<T>(field: &mut Option<T>, new: Option<T>) {
    if let Some(v) = new {
        *field = Some(v);
    }
}
