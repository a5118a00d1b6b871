use crate::artifacts::case::{Case, CaseContext, CaseKind};
use crate::errors::BaselineError;
use std::path::{Path, PathBuf};

const COMMAND_FILE: &str = "command";
const STDOUT_FILE: &str = "stdout";
const STDERR_FILE: &str = "stderr";
const ERROR_FILE: &str = "error";

/// Captured output of a command case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    /// Set when the command could not be spawned or exited unsuccessfully.
    pub error: Option<String>,
}

/// The command a case holds and the folder it runs in.
///
/// A file case is the command itself and runs next to it; a directory case
/// keeps it in a `command` file and runs inside the case folder.
pub fn command_info(case: &Case) -> Result<(String, PathBuf), BaselineError> {
    match case.kind {
        CaseKind::File => {
            let command = std::fs::read_to_string(&case.case_path)?;
            let cwd = case
                .case_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            Ok((command, cwd))
        }
        CaseKind::Directory => {
            let command_path = case.case_path.join(COMMAND_FILE);
            if !command_path.is_file() {
                return Err(BaselineError::NotCommandCase {
                    case_name: case.name.clone(),
                });
            }
            Ok((std::fs::read_to_string(command_path)?, case.case_path.clone()))
        }
    }
}

/// Runs the case's command through `sh -c`.
///
/// A command that fails to start or exits non-zero is not an error here; the
/// failure is recorded in [`CommandResult::error`] so it can be baselined like
/// any other output.
pub async fn exec_command(context: &CaseContext) -> Result<CommandResult, BaselineError> {
    let (command, cwd) = command_info(context.case())?;

    let output = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(command.trim())
        .current_dir(&cwd)
        .output()
        .await;

    Ok(match output {
        Ok(output) => CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            error: (!output.status.success())
                .then(|| format!("Command failed: {}", output.status)),
        },
        Err(e) => CommandResult {
            error: Some(e.to_string()),
            ..Default::default()
        },
    })
}

/// Writes the non-empty parts of `result` as `stdout`, `stderr` and `error`
/// files under `result_path`.
pub async fn write_command_result(
    result_path: &Path,
    result: &CommandResult,
) -> Result<(), BaselineError> {
    tokio::fs::create_dir_all(result_path).await?;

    let parts = [
        (STDOUT_FILE, Some(&result.stdout)),
        (STDERR_FILE, Some(&result.stderr)),
        (ERROR_FILE, result.error.as_ref()),
    ];

    for (name, content) in parts {
        if let Some(content) = content.filter(|c| !c.is_empty()) {
            tokio::fs::write(result_path.join(name), content).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    fn case(dir: &TempDir, name: &str) -> Case {
        Case::discover(
            name,
            &dir.path().join("cases"),
            &dir.path().join("baselines"),
            &dir.path().join("results"),
        )
        .expect("Failed to discover case")
    }

    #[test]
    fn file_case_is_its_own_command() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        dir.child("cases/echo").write_str("echo hi\n")?;

        let (command, cwd) = command_info(&case(&dir, "echo"))?;

        assert_eq!(command, "echo hi\n");
        assert_eq!(cwd, dir.path().join("cases"));

        Ok(())
    }

    #[test]
    fn directory_case_without_command_file_is_rejected() -> Result<(), Box<dyn std::error::Error>>
    {
        let dir = TempDir::new()?;
        dir.child("cases/plain/input.txt").write_str("data")?;

        let err = command_info(&case(&dir, "plain")).unwrap_err();

        assert_eq!(
            err.to_string(),
            "The case 'plain' is not a supported command case"
        );

        Ok(())
    }

    #[tokio::test]
    async fn only_non_empty_parts_are_written() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let result = CommandResult {
            stdout: "out".to_string(),
            stderr: String::new(),
            error: Some("boom".to_string()),
        };

        write_command_result(&dir.path().join("r"), &result).await?;

        dir.child("r/stdout").assert("out");
        dir.child("r/stderr").assert(predicates::path::missing());
        dir.child("r/error").assert("boom");

        Ok(())
    }
}
