//! Directory scans used as the unit of discovery. Every call re-reads the
//! directory; results are sorted so downstream traversal is deterministic.
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern, glob_with};
use tracing::warn;

use crate::error::Result;

/// Files in `dir` matching the glob `pattern` (e.g. `*.tif`), sorted by path.
/// Matching ignores case, so `*.tif` also finds `.TIF` files.
/// A missing directory yields an empty list.
pub fn list_matching(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let escaped = Pattern::escape(&dir.to_string_lossy());
    let full = Path::new(&escaped).join(pattern).to_string_lossy().to_string();
    let mut files = Vec::new();
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };
    for entry in glob_with(&full, options)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Cannot inspect {:?}: {}", e.path(), e),
        }
    }
    files.sort();
    Ok(files)
}

/// Regular files in `dir` whose name ends with `suffix`, sorted by file name.
/// A missing directory yields an empty list.
pub fn list_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !dir.is_dir() {
        warn!("Directory {:?} does not exist", dir);
        return Ok(files);
    }
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b_stack.tif", "a_stack.tif", "notes.txt", "c.tif", "D.TIF"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("sub_stack.tif")).unwrap();

        let tifs = list_matching(dir.path(), "*.tif").unwrap();
        let names: Vec<_> = tifs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["D.TIF", "a_stack.tif", "b_stack.tif", "c.tif"]);

        let stacks = list_with_suffix(dir.path(), "_stack.tif").unwrap();
        assert_eq!(stacks.len(), 2);
        assert!(stacks[0].ends_with("a_stack.tif"));
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent");
        assert!(list_matching(&absent, "*.tif").unwrap().is_empty());
        assert!(list_with_suffix(&absent, "_stack.tif").unwrap().is_empty());
    }
}
