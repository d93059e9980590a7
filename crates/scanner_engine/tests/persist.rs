use std::fs;

use scanner_engine::{write_atomically, PersistError};
use tempfile::TempDir;

#[test]
fn missing_parent_directories_are_created() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config").join("scanner").join("settings.ron");

    write_atomically(&path, b"(host: \"a\")").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "(host: \"a\")");
}

#[test]
fn existing_file_is_replaced_without_leftovers() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.ron");

    write_atomically(&path, b"(host: \"a\")").unwrap();
    write_atomically(&path, b"(host: \"b\")").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "(host: \"b\")");
    let entries = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(entries, 1, "staging file left behind");
}

#[test]
fn parent_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let err = write_atomically(&blocker.join("settings.ron"), b"data").unwrap_err();

    assert!(matches!(err, PersistError::NotADirectory(ref dir) if *dir == blocker));
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
}

#[test]
fn path_without_file_name_is_rejected() {
    let temp = TempDir::new().unwrap();
    let err = write_atomically(&temp.path().join(".."), b"data").unwrap_err();
    assert!(matches!(err, PersistError::NoFileName(_)));
}
