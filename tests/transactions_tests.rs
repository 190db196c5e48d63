// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintec::app::Session;
use fintec::models::Category;
use fintec::{cli, commands::transactions};
use rusqlite::Connection;

fn run(session: &mut Session, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["fintec", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => transactions::handle(session, tx_m),
        _ => panic!("no tx subcommand"),
    }
}

fn setup() -> Session {
    Session::init(Connection::open_in_memory().unwrap(), "2025-01").unwrap()
}

#[test]
fn add_and_list_through_the_cli() {
    let mut s = setup();
    run(&mut s, &["add", "income", "--name", "Salário", "--value", "5000"]).unwrap();
    run(
        &mut s,
        &["add", "investment", "--name", "MXRF11", "--value", "300", "--type", "FIIs"],
    )
    .unwrap();
    run(
        &mut s,
        &["add", "expense", "--name", "Aluguel", "--value", "1500", "--month", "2025-02"],
    )
    .unwrap();

    let rows = transactions::query_rows(&s, None);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Aluguel");
    assert_eq!(rows[0].planned, Some(0.0));

    s.select_month("2025-01").unwrap();
    let rows = transactions::query_rows(&s, None);
    let kinds: Vec<&str> = rows.iter().map(|r| r.kind.as_str()).collect();
    assert_eq!(kinds, vec!["income", "investment"]);
    assert_eq!(rows[1].investment_type.as_deref(), Some("FIIs"));
    assert_eq!(rows[1].color, "#8257e6");

    let only = transactions::query_rows(&s, Some(Category::Investment));
    assert_eq!(only.len(), 1);
}

#[test]
fn invalid_add_is_reported() {
    let mut s = setup();
    let err = run(&mut s, &["add", "income", "--name", "Bônus", "--value", "abc"]).unwrap_err();
    assert_eq!(err.to_string(), "Dados inválidos");
    assert!(transactions::query_rows(&s, None).is_empty());
}

#[test]
fn edit_keeps_fields_that_were_not_passed() {
    let mut s = setup();
    run(
        &mut s,
        &["add", "expense", "--name", "Internet", "--value", "100", "--planned", "120"],
    )
    .unwrap();
    let id = transactions::query_rows(&s, None)[0].id.to_string();

    run(&mut s, &["edit", "expense", &id, "--value", "95.5", "--name", ""]).unwrap();
    let row = &transactions::query_rows(&s, None)[0];
    assert_eq!(row.name, "Internet");
    assert_eq!(row.value, 95.5);
    assert_eq!(row.planned, Some(120.0));
    assert!(s.editing().is_none());
}

#[test]
fn remove_unknown_id_keeps_the_list() {
    let mut s = setup();
    run(&mut s, &["add", "income", "--name", "A", "--value", "1"]).unwrap();
    run(&mut s, &["remove", "income", "12345"]).unwrap();
    assert_eq!(transactions::query_rows(&s, None).len(), 1);

    let id = transactions::query_rows(&s, None)[0].id.to_string();
    run(&mut s, &["remove", "income", &id]).unwrap();
    assert!(transactions::query_rows(&s, None).is_empty());
}
