use derive_new::new;
use filetime::FileTime;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    // make sure the parent directory exists
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

pub fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    write_file(FileSpec::new(path.clone(), content.to_string()));
    path
}

pub fn write_generated_lines(root: &Path, relative: &str, count: usize) -> Vec<String> {
    use fake::{Fake, faker::lorem::en::Words};

    let lines = (0..count)
        .map(|i| format!("{i}: {}", Words(3..6).fake::<Vec<String>>().join(" ")))
        .collect::<Vec<_>>();
    write(root, relative, &lines.join("\n"));

    lines
}

pub fn create_directory(path: &Path) {
    std::fs::create_dir_all(path)
        .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", path, e));
}

/// Pushes the modification time far into the past, so any later write is
/// observably newer.
pub fn age(path: &Path) {
    filetime::set_file_mtime(path, FileTime::from_unix_time(1_000_000, 0))
        .unwrap_or_else(|e| panic!("Failed to set mtime of {:?}: {}", path, e));
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e))
}
