use anyhow::Context;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A folder on disk that cases read from or write into.
#[derive(Debug, Clone)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Workspace {
            path: path.into().into_boxed_path(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Entry names directly under the folder, sorted by name.
    pub fn list_dir(&self) -> std::io::Result<Vec<String>> {
        let mut names = std::fs::read_dir(&self.path)?
            .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
            .collect::<std::io::Result<Vec<_>>>()?;
        names.sort();

        Ok(names)
    }

    /// Every regular file below the folder, relative to it, in walk order.
    ///
    /// A folder that is itself a file lists as a single empty relative path.
    pub fn list_files(&self) -> Result<Vec<PathBuf>, walkdir::Error> {
        WalkDir::new(&self.path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry
                    .path()
                    .strip_prefix(&self.path)
                    .map(Path::to_path_buf)
                    .unwrap_or_default())),
                Ok(_) => None,
                Err(e) => Some(Err(e)),
            })
            .collect()
    }

    /// Reads a listed file lossily as UTF-8; an empty path reads the folder
    /// path itself.
    pub fn read_file(&self, file_path: &Path) -> std::io::Result<String> {
        let bytes = if file_path.as_os_str().is_empty() {
            std::fs::read(&self.path)?
        } else {
            std::fs::read(self.path.join(file_path))?
        };

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Names starting with a dot are never cases.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

pub fn ensure_folder_exist(folder: &Path) -> anyhow::Result<()> {
    if !folder.exists() {
        std::fs::create_dir_all(folder)
            .with_context(|| format!("Failed to create folder: {:?}", folder))?;
    }

    Ok(())
}

/// Leaves `folder` existing and empty.
///
/// Only the contents are removed; the folder itself survives, since another
/// process may be watching it.
pub fn ensure_folder_empty(folder: &Path) -> anyhow::Result<()> {
    if folder.is_file() {
        std::fs::remove_file(folder)
            .with_context(|| format!("Failed to remove file: {:?}", folder))?;
    }

    if folder.exists() {
        for entry in std::fs::read_dir(folder)? {
            let path = entry?.path();
            let metadata = std::fs::symlink_metadata(&path)
                .with_context(|| format!("Failed to get metadata for: {:?}", path))?;

            if metadata.is_dir() {
                std::fs::remove_dir_all(&path)
                    .with_context(|| format!("Failed to remove directory: {:?}", path))?;
            } else {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove file: {:?}", path))?;
            }
        }
    }

    ensure_folder_exist(folder)
}
