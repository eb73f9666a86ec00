use cd_inventory_core::{
    read_inventory, write_inventory, CdRecord, Inventory, SessionEnd, Shell, ShellError,
    StorageError,
};
use std::fs;
use std::path::Path;

const LISTING_HEADER: &str = "======= The Current Inventory: =======";

fn run_session(path: &Path, script: &str) -> (Inventory, SessionEnd, String) {
    let mut output = Vec::new();
    let mut shell = Shell::open(path, script.as_bytes(), &mut output).unwrap();
    let end = shell.run().unwrap();
    let inventory = shell.into_inventory();
    (inventory, end, String::from_utf8(output).unwrap())
}

fn seed(path: &Path, records: Vec<CdRecord>) -> Inventory {
    let inventory = Inventory::from_records(records);
    write_inventory(path, &inventory).unwrap();
    inventory
}

#[test]
fn startup_without_file_creates_empty_inventory_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");

    let (inventory, end, _) = run_session(&path, "x\n");

    assert_eq!(end, SessionEnd::Exited);
    assert!(inventory.is_empty());
    assert!(path.exists());
    assert!(read_inventory(&path).unwrap().is_empty());
}

#[test]
fn invalid_menu_tokens_never_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");
    seed(&path, vec![CdRecord::new(1, "Kept", "Safe")]);

    let (inventory, end, output) = run_session(&path, "z\n\nLOAD\n");

    assert_eq!(end, SessionEnd::InputClosed);
    assert_eq!(inventory.len(), 1);
    assert_eq!(output.matches("[l] load Inventory from file").count(), 1);
    assert_eq!(output.matches("Which operation would you like").count(), 4);
    assert!(!output.contains(LISTING_HEADER));
    assert!(!output.contains("WARNING"));
}

#[test]
fn menu_choice_ignores_case_and_surrounding_whitespace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");

    let (_, end, output) = run_session(&path, "  I \n\tX\n");

    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(output.matches(LISTING_HEADER).count(), 1);
}

#[test]
fn add_reprompts_until_id_is_an_integer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");

    let (inventory, _, output) = run_session(&path, "a\nabc\n1.5\n 1 \n Test \nArtist\nx\n");

    assert_eq!(inventory.records(), &[CdRecord::new(1, "Test", "Artist")]);
    assert_eq!(output.matches("Please enter an integer").count(), 2);
    assert!(output.contains("1\tTest (by:Artist)"));
}

#[test]
fn add_accepts_empty_title_and_artist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");

    let (inventory, _, _) = run_session(&path, "a\n4\n\n\nx\n");

    assert_eq!(inventory.records(), &[CdRecord::new(4, "", "")]);
}

#[test]
fn delete_removes_first_matching_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");
    seed(
        &path,
        vec![
            CdRecord::new(7, "First", "A"),
            CdRecord::new(2, "Other", "B"),
            CdRecord::new(7, "Second", "C"),
        ],
    );

    let (inventory, _, output) = run_session(&path, "d\nseven\n7\nx\n");

    assert_eq!(
        inventory.records(),
        &[CdRecord::new(2, "Other", "B"), CdRecord::new(7, "Second", "C")]
    );
    assert_eq!(output.matches("please enter an integer").count(), 1);
    assert!(output.contains("The CD was removed"));
    assert_eq!(output.matches(LISTING_HEADER).count(), 2);
}

#[test]
fn delete_of_unknown_id_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");
    let seeded = seed(&path, vec![CdRecord::new(1, "Only", "One")]);

    let (inventory, _, output) = run_session(&path, "d\n99\nx\n");

    assert_eq!(inventory, seeded);
    assert!(output.contains("Could not find this CD!"));
}

#[test]
fn save_requires_y_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");

    let (inventory, _, output) = run_session(&path, "a\n1\nT\nA\ns\nyes\n\nx\n");

    assert_eq!(inventory.len(), 1);
    assert!(output.contains("The inventory was NOT saved to file."));
    assert!(read_inventory(&path).unwrap().is_empty());
}

#[test]
fn exit_discards_unsaved_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");
    let seeded = seed(&path, vec![CdRecord::new(1, "Saved", "Before")]);

    run_session(&path, "a\n2\nUnsaved\nAfter\nd\n1\nx\n");

    assert_eq!(read_inventory(&path).unwrap(), seeded);
}

#[test]
fn reload_without_yes_keeps_in_memory_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");

    let (inventory, _, output) = run_session(&path, "a\n1\nT\nA\nl\ny\n\nx\n");

    assert_eq!(inventory.len(), 1);
    assert!(output.contains("canceling... Inventory data NOT reloaded."));
    assert!(!output.contains("reloading..."));
}

#[test]
fn reload_with_yes_replaces_inventory_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");
    let seeded = seed(&path, vec![CdRecord::new(3, "On disk", "Band")]);

    let (inventory, _, output) = run_session(&path, "a\n1\nT\nA\nl\nYeS\nx\n");

    assert_eq!(inventory, seeded);
    assert!(output.contains("reloading..."));
}

#[test]
fn reload_of_missing_file_is_reported_and_keeps_inventory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");
    let mut output = Vec::new();
    let script = "a\n1\nT\nA\nl\nyes\nx\n";
    let mut shell = Shell::open(&path, script.as_bytes(), &mut output).unwrap();
    fs::remove_file(&path).unwrap();

    let end = shell.run().unwrap();
    let inventory = shell.into_inventory();

    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(inventory.records(), &[CdRecord::new(1, "T", "A")]);
    assert!(!path.exists());
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Could not reload"));
}

#[test]
fn reload_of_corrupt_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");
    let mut output = Vec::new();
    let mut shell = Shell::open(&path, "l\nyes\nx\n".as_bytes(), &mut output).unwrap();
    fs::write(&path, b"\x00\x01\x02 definitely not an inventory").unwrap();

    let err = shell.run().unwrap_err();

    assert!(
        matches!(err, ShellError::Storage(StorageError::Corrupt(_))),
        "unexpected error: {err}"
    );
}

#[test]
fn startup_with_corrupt_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");
    fs::write(&path, b"truncated").unwrap();

    let result = Shell::open(&path, "x\n".as_bytes(), Vec::new());

    match result {
        Err(ShellError::Storage(StorageError::Corrupt(_))) => {}
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("corrupt file must not open"),
    }
}

#[test]
fn closed_input_mid_command_ends_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");

    let (inventory, end, _) = run_session(&path, "a\n5\n");

    assert_eq!(end, SessionEnd::InputClosed);
    assert!(inventory.is_empty());
}

#[test]
fn add_save_restart_load_shows_same_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");

    let (first, _, first_output) = run_session(&path, "a\n1\nTest\nArtist\ni\ns\ny\nx\n");
    assert_eq!(first.records(), &[CdRecord::new(1, "Test", "Artist")]);
    assert!(first_output.contains("1\tTest (by:Artist)"));

    let (second, end, second_output) = run_session(&path, "l\nyes\ni\nx\n");

    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(second, first);
    let listing = second_output
        .rsplit(LISTING_HEADER)
        .next()
        .unwrap()
        .lines()
        .skip(3)
        .take_while(|line| !line.starts_with("====="))
        .collect::<Vec<_>>();
    assert_eq!(listing, vec!["1\tTest (by:Artist)"]);
}

#[test]
fn undecodable_input_line_reprompts_instead_of_ending_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");
    let script: &[u8] = b"a\n1\nKept\nA\na\n\xff\xfe\n2\nT\nA\n\xff\nx\n";
    let mut output = Vec::new();
    let mut shell = Shell::open(&path, script, &mut output).unwrap();

    let end = shell.run().unwrap();
    let inventory = shell.into_inventory();

    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(
        inventory.records(),
        &[CdRecord::new(1, "Kept", "A"), CdRecord::new(2, "T", "A")]
    );
    let output = String::from_utf8(output).unwrap();
    assert_eq!(output.matches("Please enter an integer").count(), 1);
}

#[test]
fn failed_save_is_reported_and_session_continues() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");
    let mut output = Vec::new();
    let script = "a\n1\nT\nA\ns\ny\ni\nx\n";
    let mut shell = Shell::open(&path, script.as_bytes(), &mut output).unwrap();
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    let end = shell.run().unwrap();
    let inventory = shell.into_inventory();

    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(inventory.records(), &[CdRecord::new(1, "T", "A")]);
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Could not save inventory"));
    assert!(path.is_dir());
}

#[test]
fn reload_confirmation_ignores_surrounding_whitespace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CDInventory.dat");
    let seeded = seed(&path, vec![CdRecord::new(3, "On disk", "Band")]);

    let (inventory, _, output) = run_session(&path, "a\n1\nT\nA\nl\n  yes \t\nx\n");

    assert_eq!(inventory, seeded);
    assert!(output.contains("reloading..."));
}
