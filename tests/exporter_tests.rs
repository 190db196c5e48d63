// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintec::app::Session;
use fintec::models::Category;
use fintec::store::TransactionForm;
use fintec::{cli, commands::exporter};
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

fn session() -> Session {
    let mut s = Session::init(Connection::open_in_memory().unwrap(), "2025-01").unwrap();
    s.add_transaction(
        Category::Expense,
        &TransactionForm {
            name: "Mercado".into(),
            value: "12.34".into(),
            planned: "15".into(),
            date: "2025-01-02".into(),
            ..TransactionForm::default()
        },
    )
    .unwrap();
    s
}

#[test]
fn export_transactions_streams_pretty_json() {
    let mut s = session();
    let id = s.active_ledger().unwrap().expenses[0].id;
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "fintec",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        &out_str,
        "--month",
        "2025-01",
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&mut s, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "month": "2025-01",
                "kind": "expense",
                "id": id,
                "name": "Mercado",
                "value": 12.34,
                "planned": 15.0,
                "type": null,
                "date": "2025-01-02",
                "color": "#e83f5b"
            }
        ])
    );
}

#[test]
fn export_transactions_writes_csv() {
    let mut s = session();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "fintec", "export", "transactions", "--format", "CSV", "--out", &out_str,
    ]);
    let Some(("export", export_m)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    exporter::handle(&mut s, export_m).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "month,kind,id,name,value,planned,type,date,color"
    );
    let row = lines.next().unwrap();
    assert!(row.starts_with("2025-01,expense,"));
    assert!(row.ends_with(",Mercado,12.34,15,,2025-01-02,#e83f5b"));
    assert!(lines.next().is_none());
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let mut s = session();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "fintec",
        "export",
        "transactions",
        "--format",
        "xml",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&mut s, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}
