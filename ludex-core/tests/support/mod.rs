#![allow(dead_code)]

pub mod catalog;
pub mod igdb_stub;

pub use catalog::FakeCatalog;

use std::path::Path;

/// Create one directory per name under `root`.
pub fn make_folders(root: &Path, names: &[&str]) {
    for name in names {
        std::fs::create_dir(root.join(name)).expect("create game folder");
    }
}

/// Directory names under `root`, sorted.
pub fn folder_names(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(root)
        .expect("read root")
        .map(|entry| entry.expect("dir entry"))
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
