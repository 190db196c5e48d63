// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use fintec::backup::{backup_file_name, export_backup_at, import_backup, read_backup};
use fintec::error::LedgerError;
use fintec::migrate::migrate;
use fintec::models::Document;
use serde_json::json;
use tempfile::tempdir;

fn sample() -> Document {
    migrate(json!({
        "_settings": { "colors": { "income": "#00aa00" }, "theme": "light" },
        "2025-02": {
            "incomes": [{ "id": 1, "name": "Salário", "value": 4200.5, "color": "#00aa00" }],
            "expenses": [{ "id": 2, "name": "Aluguel", "planned": 1500, "value": 1500, "date": "2025-02-10" }],
            "investments": [{ "id": 3, "name": "HGLG11", "type": "FIIs", "value": 320.25 }]
        }
    }))
    .unwrap()
}

#[test]
fn file_name_embeds_the_date() {
    let d = NaiveDate::from_ymd_opt(2025, 2, 7).unwrap();
    assert_eq!(backup_file_name(d), "FinTec-Pro-Backup-2025-02-07.json");
}

#[test]
fn export_stamps_a_copy_and_pretty_prints() {
    let doc = sample();
    let before = doc.clone();
    let now = Utc.with_ymd_and_hms(2025, 2, 28, 18, 30, 0).unwrap();
    let backup = export_backup_at(&doc, now).unwrap();

    assert_eq!(backup.file_name, "FinTec-Pro-Backup-2025-02-28.json");
    assert_eq!(doc, before);
    assert_eq!(doc.metadata.exported_at, None);

    let text = String::from_utf8(backup.bytes.clone()).unwrap();
    assert!(text.contains("\n  \"_settings\""));
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["_metadata"]["app"], "FinTec Pro");
    assert!(
        parsed["_metadata"]["exportedAt"]
            .as_str()
            .unwrap()
            .starts_with("2025-02-28T18:30:00")
    );
    assert_eq!(parsed["2025-02"]["investments"][0]["type"], "FIIs");
}

#[test]
fn import_of_export_round_trips() {
    let doc = sample();
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
    let backup = export_backup_at(&doc, now).unwrap();

    let imported = read_backup(&backup.bytes).unwrap();
    assert!(!imported.legacy);
    let mut restored = imported.document;
    assert_eq!(restored.metadata.exported_at, Some(now));
    restored.metadata.exported_at = None;
    assert_eq!(restored, doc);
}

#[test]
fn legacy_backups_are_flagged() {
    let bytes = serde_json::to_vec(&json!({
        "2023-11": { "incomes": [{ "id": 9, "name": "Venda", "value": 90 }] }
    }))
    .unwrap();
    let imported = read_backup(&bytes).unwrap();
    assert!(imported.legacy);
    assert_eq!(imported.document.metadata.migrated_from_old_format, Some(true));
}

#[test]
fn malformed_backup_is_a_parse_error() {
    let err = import_backup(b"{ not json").unwrap_err();
    assert!(matches!(err, LedgerError::Parse(_)));

    let err = import_backup(b"[1, 2, 3]").unwrap_err();
    assert!(matches!(err, LedgerError::InvalidFormat(_)));
}

#[test]
fn backup_is_written_under_its_name() {
    let dir = tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2025, 4, 2, 0, 0, 0).unwrap();
    let backup = export_backup_at(&sample(), now).unwrap();
    let path = backup.write_to(dir.path()).unwrap();

    assert_eq!(path, dir.path().join("FinTec-Pro-Backup-2025-04-02.json"));
    let restored = import_backup(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(restored.months, sample().months);
    assert_eq!(restored.settings, sample().settings);
}
