use clap::Parser;
use pursuit::{
    Action, Compass, DiscreteState, QTable,
    adapters::TextFileStore,
    cli::commands::{
        init::{self, InitArgs},
        inspect::{self, InspectArgs, write_report},
    },
    ports::TableStore,
};
use tempfile::tempdir;

fn trained_table() -> QTable {
    let mut table = QTable::zeros();
    table.set(
        DiscreteState::tracking(Compass::East, 2).row(),
        Action::East,
        4.5,
    );
    table.set(DiscreteState::TERMINAL_ROW, Action::West, -1.0);
    table
}

#[test]
fn init_creates_zero_table() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("qtable.txt");

    init::execute(InitArgs::parse_from(["pursuit-init", path.to_str().unwrap()]))
        .expect("init should succeed");

    assert_eq!(TextFileStore::new().load(&path).unwrap(), QTable::zeros());
}

#[test]
fn init_keeps_trained_table_unless_forced() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("qtable.txt");
    let store = TextFileStore::new();
    store.save(&trained_table(), &path).unwrap();

    init::execute(InitArgs::parse_from(["pursuit-init", path.to_str().unwrap()]))
        .expect("init without --force should leave the table alone");
    assert_eq!(store.load(&path).unwrap(), trained_table());

    init::execute(InitArgs::parse_from([
        "pursuit-init",
        path.to_str().unwrap(),
        "--force",
    ]))
    .expect("init --force should succeed");
    assert_eq!(store.load(&path).unwrap(), QTable::zeros());
}

#[test]
fn init_refuses_to_replace_malformed_table() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("qtable.txt");
    std::fs::write(&path, "1 2 3\n".repeat(81)).unwrap();

    let result = init::execute(InitArgs::parse_from(["pursuit-init", path.to_str().unwrap()]));
    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "1 2 3\n".repeat(81));
}

#[test]
fn report_lists_every_state() {
    let mut out = Vec::new();
    let shown = write_report(&trained_table(), false, &mut out).unwrap();
    assert_eq!(shown, DiscreteState::ROWS);

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), DiscreteState::ROWS + 1);
    assert!(text.lines().nth(1).unwrap().trim_start().starts_with("0  N/1"));
}

#[test]
fn learned_only_report_skips_zero_rows() {
    let mut out = Vec::new();
    let shown = write_report(&trained_table(), true, &mut out).unwrap();
    assert_eq!(shown, 2);

    let text = String::from_utf8(out).unwrap();
    let rows: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].contains("E/2") && rows[0].ends_with("East"));
    // Terminal row: North, East and South tie at zero; the first wins.
    assert!(rows[1].contains("Terminal") && rows[1].ends_with("North"));
}

#[test]
fn inspect_fails_on_missing_table() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("absent.txt");
    let args = InspectArgs::parse_from(["pursuit-inspect", path.to_str().unwrap(), "--learned-only"]);
    assert!(args.learned_only);
    assert!(inspect::execute(args).is_err());
}
