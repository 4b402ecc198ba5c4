use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::Result;
use crate::types::EnumerationOrder;

/// All non-directory entries of `input_dir`, sorted by `order`. Output
/// numbering follows this order, so it is deterministic for a given listing.
pub fn list_input_files(input_dir: &Path, order: EnumerationOrder) -> Result<Vec<PathBuf>> {
    let mut files: Vec<(PathBuf, SystemTime)> = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        files.push((path, modified));
    }

    match order {
        EnumerationOrder::Name => files.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name())),
        EnumerationOrder::Modified => files.sort_by(|a, b| {
            a.1.cmp(&b.1)
                .then_with(|| a.0.file_name().cmp(&b.0.file_name()))
        }),
    }

    Ok(files.into_iter().map(|(path, _)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::time::Duration;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn skips_directories_and_sorts_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.jpg", ".DS_Store", "a.png", "c.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();

        let files = list_input_files(dir.path(), EnumerationOrder::Name).unwrap();
        assert_eq!(names(&files), vec![".DS_Store", "a.png", "b.jpg", "c.txt"]);
    }

    #[test]
    fn sorts_by_modification_time() {
        let dir = tempfile::tempdir().unwrap();
        let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        for (name, offset) in [("a.jpg", 30), ("b.jpg", 10), ("c.jpg", 20)] {
            let path = dir.path().join(name);
            let file = File::create(&path).unwrap();
            file.set_modified(base + Duration::from_secs(offset)).unwrap();
        }

        let files = list_input_files(dir.path(), EnumerationOrder::Modified).unwrap();
        assert_eq!(names(&files), vec!["b.jpg", "c.jpg", "a.jpg"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_input_files(&dir.path().join("nope"), EnumerationOrder::Name).is_err());
    }
}
