use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CaseKind {
    File,
    Directory,
}

impl From<&CaseKind> for &str {
    fn from(kind: &CaseKind) -> Self {
        match kind {
            CaseKind::File => "file",
            CaseKind::Directory => "directory",
        }
    }
}

impl std::fmt::Display for CaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", <&str>::from(self))
    }
}

/// One entry under the cases root and the paths derived from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub name: String,
    pub kind: CaseKind,
    pub case_path: PathBuf,
    pub baseline_path: PathBuf,
    pub result_path: PathBuf,
}

impl Case {
    pub fn discover(
        name: &str,
        cases_root: &Path,
        baselines_root: &Path,
        results_root: &Path,
    ) -> std::io::Result<Self> {
        let case_path = cases_root.join(name);
        let kind = if std::fs::metadata(&case_path)?.is_dir() {
            CaseKind::Directory
        } else {
            CaseKind::File
        };

        Ok(Case {
            name: name.to_string(),
            kind,
            case_path,
            baseline_path: baselines_root.join(name),
            result_path: results_root.join(name),
        })
    }

    pub fn is_directory(&self) -> bool {
        self.kind == CaseKind::Directory
    }
}
