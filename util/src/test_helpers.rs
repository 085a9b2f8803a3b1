use std::{fs, path::Path};
use tempfile::TempDir;

/// Creates a temporary directory laid out like a student repository, with
/// one file per `(relative path, contents)` pair. The directory is removed
/// when the returned `TempDir` is dropped.
///
/// Keep the returned `TempDir` in scope for as long as you need the files.
pub fn setup_submission_dir(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().expect("failed to create tempdir");
    for (rel, contents) in files {
        let path = tmp.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture dir");
        }
        fs::write(&path, contents).expect("failed to write fixture file");
    }
    tmp
}

/// True when `dir` contains a file at `rel`.
pub fn has_file(dir: &Path, rel: &str) -> bool {
    dir.join(rel).is_file()
}
