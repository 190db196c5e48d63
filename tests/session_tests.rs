// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintec::app::{IMPORTED_MIGRATED_MESSAGE, RESTORED_MESSAGE, SAVED_MESSAGE, Session};
use fintec::db;
use fintec::error::LedgerError;
use fintec::migrate::migrate;
use fintec::models::{Category, Theme};
use fintec::store::{TransactionForm, TransactionPatch};
use rusqlite::Connection;
use serde_json::json;

fn session() -> Session {
    Session::init(Connection::open_in_memory().unwrap(), "2025-01").unwrap()
}

fn form(name: &str, value: &str) -> TransactionForm {
    TransactionForm {
        name: name.into(),
        value: value.into(),
        ..TransactionForm::default()
    }
}

fn stored(session: &Session) -> fintec::models::Document {
    migrate(db::load(session.connection()).unwrap().unwrap()).unwrap()
}

#[test]
fn init_migrates_and_persists_an_empty_store() {
    let s = session();
    assert_eq!(s.active_month(), "2025-01");
    assert!(s.active_ledger().is_some());
    assert_eq!(s.summary().balance, 0.0);

    let saved = stored(&s);
    assert_eq!(saved.settings.theme, Theme::Dark);
    assert!(saved.months.contains_key("2025-01"));
}

#[test]
fn init_picks_up_an_existing_blob() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO storage(key, value) VALUES('finData', ?1)",
        [json!({ "2024-12": { "incomes": [{ "id": 5, "name": "13º", "value": 3000 }] } }).to_string()],
    )
    .unwrap();

    let s = Session::init(conn, "2024-12").unwrap();
    assert_eq!(s.summary().total_income, 3000.0);
    assert_eq!(
        s.active_ledger().unwrap().incomes[0].color.as_deref(),
        Some("#04d361")
    );
    // the migrated form replaces the legacy blob
    let raw = db::load(s.connection()).unwrap().unwrap();
    assert!(raw.get("_settings").is_some());
}

#[test]
fn corrupt_blob_refuses_to_start() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO storage(key, value) VALUES('finData', '{broken')",
        [],
    )
    .unwrap();
    assert!(matches!(
        Session::init(conn, "2025-01"),
        Err(LedgerError::Parse(_))
    ));
}

#[test]
fn mutations_autosave_and_recompute() {
    let mut s = session();
    s.add_transaction(Category::Income, &form("Salário", "100")).unwrap();
    s.add_transaction(Category::Income, &form("Extra", "50")).unwrap();
    s.add_transaction(Category::Expense, &form("Mercado", "30")).unwrap();
    let inv = s
        .add_transaction(
            Category::Investment,
            &TransactionForm {
                investment_type: "Reserva".into(),
                ..form("Poupança", "20")
            },
        )
        .unwrap();

    assert_eq!(s.summary().balance, 100.0);
    assert_eq!(stored(&s).month("2025-01").unwrap().incomes.len(), 2);

    assert!(s.remove_transaction(Category::Investment, inv.id()));
    assert_eq!(s.summary().balance, 120.0);
    assert!(stored(&s).month("2025-01").unwrap().investments.is_empty());
}

#[test]
fn failed_validation_changes_nothing() {
    let mut s = session();
    let err = s.add_transaction(Category::Income, &form("", "10")).unwrap_err();
    assert!(err.is_validation());
    assert!(s.active_ledger().unwrap().incomes.is_empty());
}

#[test]
fn edit_flow() {
    let mut s = session();
    let item = s.add_transaction(Category::Income, &form("Salário", "100")).unwrap();

    s.edit_transaction(Category::Income, item.id());
    assert!(s.editing().is_some());
    let patch = TransactionPatch {
        value: Some(150.0),
        ..TransactionPatch::default()
    };
    assert!(s.save_edit(Category::Income, item.id(), &patch));
    assert!(s.editing().is_none());
    assert_eq!(s.summary().total_income, 150.0);
    assert_eq!(stored(&s).month("2025-01").unwrap().incomes[0].value, 150.0);

    s.edit_transaction(Category::Income, item.id());
    s.cancel_edit();
    assert!(s.editing().is_none());
}

#[test]
fn months_are_independent() {
    let mut s = session();
    s.add_transaction(Category::Income, &form("Janeiro", "10")).unwrap();
    let feb = s.select_month("2025-02").unwrap().clone();
    assert_eq!(feb.total_income, 0.0);
    s.add_transaction(Category::Income, &form("Fevereiro", "20")).unwrap();
    assert_eq!(s.summary().total_income, 20.0);
    assert_eq!(s.select_month("2025-01").unwrap().total_income, 10.0);
}

#[test]
fn settings_changes_reach_the_charts_and_storage() {
    let mut s = session();
    s.set_color(Category::Income, "#ffffff").unwrap();
    s.set_theme(Theme::Light);
    assert_eq!(s.summary().bar_series[0].color, "#ffffff");
    let saved = stored(&s);
    assert_eq!(saved.settings.colors.income, "#ffffff");
    assert_eq!(saved.settings.theme, Theme::Light);
}

#[test]
fn save_local_confirms_only_when_not_silent() {
    let mut s = session();
    assert_eq!(s.save_local(true).unwrap(), None);
    assert_eq!(s.save_local(false).unwrap(), Some(SAVED_MESSAGE));
}

#[test]
fn autosave_failure_is_not_fatal() {
    let mut s = session();
    s.connection().execute("DROP TABLE storage", []).unwrap();
    let item = s.add_transaction(Category::Income, &form("Salário", "100"));
    assert!(item.is_ok());
    assert_eq!(s.summary().total_income, 100.0);
    assert_eq!(s.save_local(true).unwrap(), None);
    assert!(matches!(
        s.save_local(false),
        Err(LedgerError::Persistence(_))
    ));
}

#[test]
fn upload_replaces_the_ledger() {
    let mut s = session();
    s.add_transaction(Category::Income, &form("Antigo", "1")).unwrap();

    let legacy = serde_json::to_vec(&json!({
        "2025-01": { "expenses": [{ "id": 77, "name": "Luz", "value": 90, "planned": 100 }] }
    }))
    .unwrap();
    let outcome = s.upload_data(&legacy).unwrap();
    assert!(outcome.migrated);
    assert!(outcome.persisted);
    assert_eq!(outcome.message(), IMPORTED_MIGRATED_MESSAGE);
    assert!(s.active_ledger().unwrap().incomes.is_empty());
    assert_eq!(s.summary().total_expense, 90.0);
    assert_eq!(stored(&s).month("2025-01").unwrap().expenses[0].id, 77);

    let backup = s.download_data().unwrap();
    let outcome = s.upload_data(&backup.bytes).unwrap();
    assert!(!outcome.migrated);
    assert_eq!(outcome.message(), RESTORED_MESSAGE);
}

#[test]
fn malformed_upload_leaves_the_session_untouched() {
    let mut s = session();
    s.add_transaction(Category::Income, &form("Salário", "100")).unwrap();
    let before = s.document().clone();

    let err = s.upload_data(b"definitely not json").unwrap_err();
    assert!(matches!(err, LedgerError::Parse(_)));
    assert_eq!(s.document(), &before);
    assert_eq!(stored(&s).months, before.months);
}
