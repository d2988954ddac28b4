//! Tests for the flat text q-table format on disk.

use pursuit::{
    Action, DiscreteState, QTable,
    adapters::TextFileStore,
    ports::TableStore,
    q_learning::{table_from_str, table_to_string},
};
use tempfile::TempDir;

fn trained_text() -> String {
    let mut text = String::new();
    for row in 0..DiscreteState::ROWS {
        let v = row as f64;
        text.push_str(&format!("{} {} {} {}\n", v * 0.5, -v, 200.0 - v, v / 4.0));
    }
    text
}

#[test]
fn test_load_then_save_is_byte_identical() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("qtable.txt");
    let original = trained_text();
    std::fs::write(&path, &original).unwrap();

    let store = TextFileStore::new();
    let table = store.load(&path).expect("Failed to load");
    store.save(&table, &path).expect("Failed to save");

    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_reads_tables_written_with_trailing_spaces() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("qtable.txt");
    std::fs::write(&path, "0.0 0.0 0.0 0.0 \n".repeat(DiscreteState::ROWS)).unwrap();

    let table = TextFileStore::new().load(&path).unwrap();
    assert_eq!(table, QTable::zeros());
}

#[test]
fn test_rows_follow_state_index_order() {
    let mut table = QTable::zeros();
    table.set(DiscreteState::TERMINAL_ROW, Action::South, 9.0);
    table.set(0, Action::West, 1.0);

    let text = table_to_string(&table);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 81);
    assert_eq!(lines[0], "0 0 0 1");
    assert_eq!(lines[80], "0 0 9 0");
    assert_eq!(table_from_str(&text).unwrap(), table);
}

#[test]
fn test_eighty_line_table_is_rejected() {
    let text: String = trained_text().lines().take(80).map(|l| format!("{l}\n")).collect();
    let err = table_from_str(&text).unwrap_err();
    assert!(err.is_format_error());
}

#[test]
fn test_failed_load_leaves_file_untouched() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("qtable.txt");
    let broken = "1 2 3\n".repeat(DiscreteState::ROWS);
    std::fs::write(&path, &broken).unwrap();

    assert!(TextFileStore::new().load(&path).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
}
