use rpcbridge::{Catalog, CatalogError};
use std::{
    fs,
    path::{Path, PathBuf},
};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/math.rs")
}

const FIXTURE_FUNCTIONS: [&str; 12] = [
    "add", "echo", "first", "greet", "initial", "is_even", "last_char", "log_line", "ping",
    "ratio", "shout", "total",
];

#[test]
fn scan_records_top_level_functions_except_main() {
    let mut catalog = Catalog::default();
    assert_eq!(catalog.scan_file(fixture()).unwrap(), FIXTURE_FUNCTIONS.len());

    let names: Vec<_> = catalog
        .functions_in(&fixture())
        .map(|info| info.name.as_str())
        .collect();
    assert_eq!(names, FIXTURE_FUNCTIONS);
    assert!(catalog.get("main").is_none());
    assert!(catalog.get("hidden").is_none());

    let add = catalog.get("add").unwrap();
    assert_eq!(add.parameter_names, ["a", "b"]);
    assert_eq!(add.source_file, fixture());
    assert!(!add.is_registered());
    assert!(add.parameter_target_types.is_empty());
}

#[test]
fn rescanning_is_idempotent() {
    let mut catalog = Catalog::default();
    catalog.scan_file(fixture()).unwrap();
    let first: Vec<_> = catalog.functions_in(&fixture()).cloned().collect();

    catalog.scan_file(fixture()).unwrap();
    let second: Vec<_> = catalog.functions_in(&fixture()).cloned().collect();

    assert_eq!(first, second);
    assert_eq!(catalog.len(), FIXTURE_FUNCTIONS.len());
}

#[test]
fn rescanning_a_changed_signature_replaces_the_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("evolving.rs");
    fs::write(&path, "fn grow(a: i64) {}\n").unwrap();

    let mut catalog = Catalog::default();
    catalog.scan_file(&path).unwrap();
    fs::write(&path, "fn grow(a: i64, b: i64) {}\n").unwrap();
    catalog.scan_file(&path).unwrap();

    assert_eq!(catalog.get("grow").unwrap().parameter_names, ["a", "b"]);
}

#[test]
fn lookup_file() {
    let mut catalog = Catalog::default();
    let err = catalog.lookup_file("add").unwrap_err();
    assert!(matches!(&err, CatalogError::UnknownSourceFile(name) if name == "add"));

    catalog.scan_file(fixture()).unwrap();
    assert_eq!(catalog.lookup_file("add").unwrap(), fixture());
}

#[test]
fn names_are_unique_across_files() {
    let dir = tempfile::tempdir().unwrap();
    let other = dir.path().join("other.rs");
    fs::write(&other, "fn subtract(a: i64, b: i64) -> i64 { a - b }\nfn add(x: i64) {}\n").unwrap();

    let mut catalog = Catalog::default();
    catalog.scan_file(fixture()).unwrap();
    let err = catalog.scan_file(&other).unwrap_err();
    assert!(
        matches!(&err, CatalogError::DuplicateFunction { name, first, second }
            if name == "add" && first == &fixture() && second == &other),
        "{err}"
    );

    // The clashing file contributes nothing, not even its unique functions.
    assert!(catalog.get("subtract").is_none());
    assert_eq!(catalog.get("add").unwrap().parameter_names, ["a", "b"]);
    assert_eq!(catalog.functions_in(&other).count(), 0);
}

#[test]
fn custom_entry_point() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bin.rs");
    fs::write(&path, "fn run() {}\nfn main() {}\n").unwrap();

    let mut catalog = Catalog::new("run");
    assert_eq!(catalog.scan_file(&path).unwrap(), 1);
    assert!(catalog.get("run").is_none());
    assert!(catalog.get("main").is_some());
}

#[test]
fn unreadable_file_records_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = Catalog::default();
    let err = catalog.scan_file(dir.path().join("missing.rs")).unwrap_err();
    assert!(matches!(err, CatalogError::Signature(_)));
    assert!(catalog.is_empty());
}
