//! Inventory tests for `md2html-inventory`.
//!
//! Each test builds its own `TempDir` tree.

use std::fs;
use std::path::{Path, PathBuf};

use md2html_inventory::{classify, scan, EntryKind, InventoryError};
use rstest::rstest;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn touch(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(&path, "x").expect("write fixture");
    path
}

// ---------------------------------------------------------------------------
// classify
// ---------------------------------------------------------------------------

#[rstest]
#[case("a.md", EntryKind::Document)]
#[case("a.MD", EntryKind::Document)]
#[case("a.markdown", EntryKind::Document)]
#[case("page.jinja", EntryKind::Template)]
#[case("page.JINJA", EntryKind::Template)]
#[case("style.css", EntryKind::Asset)]
#[case("README", EntryKind::Asset)]
#[case("archive.md.bak", EntryKind::Asset)]
fn classification(#[case] name: &str, #[case] kind: EntryKind) {
    assert_eq!(classify(Path::new(name)), kind);
}

// ---------------------------------------------------------------------------
// scan
// ---------------------------------------------------------------------------

#[test]
fn empty_directory() {
    let dir = TempDir::new().unwrap();
    let inv = scan(dir.path()).expect("scan");
    assert_eq!(inv.root, dir.path());
    assert_eq!(inv.file_count(), 0);
    assert!(inv.directories.is_empty());
}

#[test]
fn mixed_content_is_sorted_into_buckets() {
    let dir = TempDir::new().unwrap();
    let doc = touch(dir.path(), "index.md");
    let tpl = touch(dir.path(), "index.jinja");
    let asset = touch(dir.path(), "logo.png");
    let nested = touch(dir.path(), "blog/post.markdown");

    let inv = scan(dir.path()).expect("scan");
    assert_eq!(inv.documents, vec![nested, doc]);
    assert_eq!(inv.templates, vec![tpl]);
    assert_eq!(inv.assets, vec![asset]);
    assert_eq!(inv.directories, vec![PathBuf::from("blog")]);
}

#[test]
fn nested_directories_are_relative() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "a/b/c/deep.md");
    let inv = scan(dir.path()).expect("scan");
    assert_eq!(
        inv.directories,
        vec![
            PathBuf::from("a"),
            PathBuf::from("a/b"),
            PathBuf::from("a/b/c"),
        ]
    );
}

#[test]
fn walk_order_is_stable() {
    let dir = TempDir::new().unwrap();
    for name in ["c.md", "a.md", "b.md"] {
        touch(dir.path(), name);
    }
    let inv = scan(dir.path()).unwrap();
    let names: Vec<_> = inv
        .documents
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.md", "b.md", "c.md"]);
}

#[test]
fn single_file_uses_parent_as_root() {
    let dir = TempDir::new().unwrap();
    let doc = touch(dir.path(), "only.md");
    touch(dir.path(), "ignored.md");
    let inv = scan(&doc).expect("scan");
    assert_eq!(inv.root, dir.path());
    assert_eq!(inv.documents, vec![doc]);
    assert!(inv.directories.is_empty());
}

#[test]
fn missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = scan(&dir.path().join("nope")).expect_err("missing");
    assert!(matches!(err, InventoryError::NotFound { .. }));
}
