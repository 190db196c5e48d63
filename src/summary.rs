// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, InvestmentType, MonthLedger, Settings};
use serde::Serialize;
use std::collections::BTreeMap;

pub const FREE_BALANCE_LABEL: &str = "Saldo Livre";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

impl ChartSlice {
    fn new(label: &str, value: f64, color: &str) -> Self {
        Self {
            label: label.to_string(),
            value,
            color: color.to_string(),
        }
    }
}

/// Derived figures for one month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
    pub total_invest: f64,
    /// Income minus expenses and investments. May be negative.
    pub balance: f64,
    pub investment_breakdown: BTreeMap<InvestmentType, f64>,
    pub bar_series: Vec<ChartSlice>,
    pub pie_series: Vec<ChartSlice>,
}

impl Summary {
    /// Balance as drawn in charts: never below zero.
    pub fn free_balance(&self) -> f64 {
        if self.balance > 0.0 { self.balance } else { 0.0 }
    }

    pub fn balance_color<'a>(&self, settings: &'a Settings) -> &'a str {
        if self.balance >= 0.0 {
            settings.colors.get(Category::Income)
        } else {
            settings.colors.get(Category::Expense)
        }
    }
}

/// Recomputes every total of `month` from scratch.
pub fn summarize(month: &MonthLedger, settings: &Settings) -> Summary {
    let total_income: f64 = month.incomes.iter().map(|i| i.value).sum();
    let total_expense: f64 = month.expenses.iter().map(|e| e.value).sum();
    let total_invest: f64 = month.investments.iter().map(|v| v.value).sum();
    let balance = total_income - (total_expense + total_invest);

    // Untyped investments count as reserve; unknown free-text types are left out.
    let mut investment_breakdown: BTreeMap<InvestmentType, f64> =
        InvestmentType::ALL.into_iter().map(|t| (t, 0.0)).collect();
    for item in &month.investments {
        let label = item
            .investment_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(InvestmentType::Reserva.label());
        if let Some(t) = InvestmentType::from_label(label) {
            *investment_breakdown.entry(t).or_insert(0.0) += item.value;
        }
    }

    let colors = &settings.colors;
    let bar_series = vec![
        ChartSlice::new(Category::Income.label(), total_income, &colors.income),
        ChartSlice::new(Category::Expense.label(), total_expense, &colors.expense),
        ChartSlice::new(Category::Investment.label(), total_invest, &colors.invest),
    ];

    let mut summary = Summary {
        total_income,
        total_expense,
        total_invest,
        balance,
        investment_breakdown,
        bar_series,
        pie_series: Vec::new(),
    };

    let mut pie = vec![ChartSlice::new(
        Category::Expense.label(),
        total_expense,
        &colors.expense,
    )];
    pie.extend(
        summary
            .investment_breakdown
            .iter()
            .filter(|(_, value)| **value > 0.0)
            .map(|(t, value)| ChartSlice::new(t.label(), *value, t.shade())),
    );
    pie.push(ChartSlice::new(
        FREE_BALANCE_LABEL,
        summary.free_balance(),
        &colors.income,
    ));
    summary.pie_series = pie;
    summary
}
