use crate::errors::BaselineError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Modification times of every file under a result root at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSnapshot {
    files: BTreeMap<PathBuf, SystemTime>,
}

impl ResultSnapshot {
    /// Walks `root` without following symlinks. A missing root yields an
    /// empty snapshot.
    pub fn capture(root: &Path) -> Result<Self, BaselineError> {
        Self::capture_excluding(root, &[])
    }

    /// Like [`capture`](Self::capture), leaving out every path in `excluded`
    /// and everything below it.
    pub fn capture_excluding(root: &Path, excluded: &[PathBuf]) -> Result<Self, BaselineError> {
        if !root.exists() {
            return Ok(Self::default());
        }

        let mut files = BTreeMap::new();
        let walk = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !excluded.iter().any(|path| entry.path() == path));
        for entry in walk {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let modified = entry.metadata()?.modified()?;
            files.insert(entry.into_path(), modified);
        }

        Ok(Self { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Files present in both snapshots with the same modification time,
    /// i.e. nothing rewrote them between `self` and `later`.
    pub fn unchanged_in(&self, later: &ResultSnapshot) -> Vec<PathBuf> {
        later
            .files
            .iter()
            .filter(|(path, modified)| self.files.get(*path) == Some(*modified))
            .map(|(path, _)| path.clone())
            .collect()
    }
}
