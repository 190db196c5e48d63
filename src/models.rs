// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_INCOME_COLOR: &str = "#04d361";
pub const DEFAULT_EXPENSE_COLOR: &str = "#e83f5b";
pub const DEFAULT_INVEST_COLOR: &str = "#8257e6";

pub const APP_NAME: &str = "FinTec Pro";
pub const APP_VERSION: &str = "1.0";
pub const APP_LOGO: &str = "logofinantec.png";

static MONTH_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}$").expect("month-key pattern"));

/// True for keys shaped like `2024-01`.
pub fn is_month_key(key: &str) -> bool {
    MONTH_KEY.is_match(key)
}

pub type TransactionId = u64;

/// Largest id a JSON number holds exactly. Stored ids above it are replaced.
pub const MAX_TRANSACTION_ID: TransactionId = (1 << 53) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Income,
    Expense,
    Investment,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Income, Category::Expense, Category::Investment];

    /// Name of the month collection holding this category.
    pub fn collection(self) -> &'static str {
        match self {
            Category::Income => "incomes",
            Category::Expense => "expenses",
            Category::Investment => "investments",
        }
    }

    /// Key of this category inside `_settings.colors`.
    pub fn color_key(self) -> &'static str {
        match self {
            Category::Income => "income",
            Category::Expense => "expense",
            Category::Investment => "invest",
        }
    }

    pub fn default_color(self) -> &'static str {
        match self {
            Category::Income => DEFAULT_INCOME_COLOR,
            Category::Expense => DEFAULT_EXPENSE_COLOR,
            Category::Investment => DEFAULT_INVEST_COLOR,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Income => "Entradas",
            Category::Expense => "Despesas",
            Category::Investment => "Investimentos",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Income => f.write_str("income"),
            Category::Expense => f.write_str("expense"),
            Category::Investment => f.write_str("investment"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "incomes" => Ok(Category::Income),
            "expense" | "expenses" => Ok(Category::Expense),
            "investment" | "investments" | "invest" => Ok(Category::Investment),
            other => Err(format!(
                "Unknown category '{}' (use income|expense|investment)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("Unknown theme '{}' (use dark|light)", other)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => f.write_str("dark"),
            Theme::Light => f.write_str("light"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colors {
    pub income: String,
    pub expense: String,
    pub invest: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            income: Category::Income.default_color().to_string(),
            expense: Category::Expense.default_color().to_string(),
            invest: Category::Investment.default_color().to_string(),
        }
    }
}

impl Colors {
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::Income => &self.income,
            Category::Expense => &self.expense,
            Category::Investment => &self.invest,
        }
    }

    pub fn set(&mut self, category: Category, color: String) {
        match category {
            Category::Income => self.income = color,
            Category::Expense => self.expense = color,
            Category::Investment => self.invest = color,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub colors: Colors,
    pub theme: Theme,
}

/// Informational block carried alongside the ledger. Business logic never
/// reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrated_from_old_format: Option<bool>,
}

impl Metadata {
    pub fn app_identity() -> Self {
        Self {
            app: Some(APP_NAME.to_string()),
            version: Some(APP_VERSION.to_string()),
            logo: Some(APP_LOGO.to_string()),
            ..Self::default()
        }
    }

    pub fn stamp_export(&mut self, now: DateTime<Utc>) {
        let identity = Self::app_identity();
        self.app = identity.app;
        self.version = identity.version;
        self.logo = identity.logo;
        self.exported_at = Some(now);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeItem {
    pub id: TransactionId,
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub id: TransactionId,
    pub name: String,
    #[serde(default)]
    pub planned: f64,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentItem {
    pub id: TransactionId,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub investment_type: Option<String>,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A single ledger entry of any category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Transaction {
    Income(IncomeItem),
    Expense(ExpenseItem),
    Investment(InvestmentItem),
}

impl Transaction {
    pub fn category(&self) -> Category {
        match self {
            Transaction::Income(_) => Category::Income,
            Transaction::Expense(_) => Category::Expense,
            Transaction::Investment(_) => Category::Investment,
        }
    }

    pub fn id(&self) -> TransactionId {
        match self {
            Transaction::Income(i) => i.id,
            Transaction::Expense(e) => e.id,
            Transaction::Investment(v) => v.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Transaction::Income(i) => &i.name,
            Transaction::Expense(e) => &e.name,
            Transaction::Investment(v) => &v.name,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Transaction::Income(i) => i.value,
            Transaction::Expense(e) => e.value,
            Transaction::Investment(v) => v.value,
        }
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            Transaction::Income(i) => i.color.as_deref(),
            Transaction::Expense(e) => e.color.as_deref(),
            Transaction::Investment(v) => v.color.as_deref(),
        }
    }
}

/// The three transaction collections of one month, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthLedger {
    #[serde(default)]
    pub incomes: Vec<IncomeItem>,
    #[serde(default)]
    pub expenses: Vec<ExpenseItem>,
    #[serde(default)]
    pub investments: Vec<InvestmentItem>,
}

impl MonthLedger {
    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty() && self.investments.is_empty()
    }

    pub fn push(&mut self, item: Transaction) {
        match item {
            Transaction::Income(i) => self.incomes.push(i),
            Transaction::Expense(e) => self.expenses.push(e),
            Transaction::Investment(v) => self.investments.push(v),
        }
    }

    pub fn find(&self, category: Category, id: TransactionId) -> Option<Transaction> {
        match category {
            Category::Income => self
                .incomes
                .iter()
                .find(|i| i.id == id)
                .cloned()
                .map(Transaction::Income),
            Category::Expense => self
                .expenses
                .iter()
                .find(|e| e.id == id)
                .cloned()
                .map(Transaction::Expense),
            Category::Investment => self
                .investments
                .iter()
                .find(|v| v.id == id)
                .cloned()
                .map(Transaction::Investment),
        }
    }

    /// Removes the first item with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, category: Category, id: TransactionId) -> bool {
        fn remove_first<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
            match items.iter().position(matches) {
                Some(pos) => {
                    items.remove(pos);
                    true
                }
                None => false,
            }
        }
        match category {
            Category::Income => remove_first(&mut self.incomes, |i| i.id == id),
            Category::Expense => remove_first(&mut self.expenses, |e| e.id == id),
            Category::Investment => remove_first(&mut self.investments, |v| v.id == id),
        }
    }

    /// All items of one category, in insertion order.
    pub fn items(&self, category: Category) -> Vec<Transaction> {
        match category {
            Category::Income => self.incomes.iter().cloned().map(Transaction::Income).collect(),
            Category::Expense => self.expenses.iter().cloned().map(Transaction::Expense).collect(),
            Category::Investment => self
                .investments
                .iter()
                .cloned()
                .map(Transaction::Investment)
                .collect(),
        }
    }

    pub fn max_id(&self) -> Option<TransactionId> {
        let incomes = self.incomes.iter().map(|i| i.id);
        let expenses = self.expenses.iter().map(|e| e.id);
        let investments = self.investments.iter().map(|v| v.id);
        incomes.chain(expenses).chain(investments).max()
    }
}

/// Root persisted object. Settings and metadata live under underscored keys;
/// every other top-level key is a month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_settings")]
    pub settings: Settings,
    #[serde(rename = "_metadata", default)]
    pub metadata: Metadata,
    #[serde(flatten)]
    pub months: BTreeMap<String, MonthLedger>,
}

impl Document {
    pub fn month(&self, key: &str) -> Option<&MonthLedger> {
        self.months.get(key)
    }

    pub fn max_id(&self) -> Option<TransactionId> {
        self.months.values().filter_map(MonthLedger::max_id).max()
    }
}

/// Investment types with a dedicated chart bucket, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InvestmentType {
    #[serde(rename = "Reserva")]
    Reserva,
    #[serde(rename = "Ações")]
    Acoes,
    #[serde(rename = "FIIs")]
    Fiis,
    #[serde(rename = "Renda Fixa")]
    RendaFixa,
}

impl InvestmentType {
    pub const ALL: [InvestmentType; 4] = [
        InvestmentType::Reserva,
        InvestmentType::Acoes,
        InvestmentType::Fiis,
        InvestmentType::RendaFixa,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InvestmentType::Reserva => "Reserva",
            InvestmentType::Acoes => "Ações",
            InvestmentType::Fiis => "FIIs",
            InvestmentType::RendaFixa => "Renda Fixa",
        }
    }

    /// Chart shade, variations of the base investment purple.
    pub fn shade(self) -> &'static str {
        match self {
            InvestmentType::Reserva => "#8257e6",
            InvestmentType::Acoes => "#6b4fc9",
            InvestmentType::Fiis => "#9c6be6",
            InvestmentType::RendaFixa => "#b39ddb",
        }
    }

    /// Exact label match. Free-text types have no bucket.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
