use crate::error::{ReleaseTagsError, Result};
use crate::git::TagSource;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Lists tags by running `git tag -l` as a child process
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: PathBuf,
    repo_dir: Option<PathBuf>,
}

impl GitCommand {
    /// Run `git` from `PATH` against the current working directory
    pub fn new() -> Self {
        GitCommand {
            program: PathBuf::from("git"),
            repo_dir: None,
        }
    }

    /// Run `git -C <dir>` so the repository need not be the working directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        GitCommand {
            program: PathBuf::from("git"),
            repo_dir: Some(dir.as_ref().to_path_buf()),
        }
    }

    /// Use a specific git executable instead of the one on `PATH`
    pub fn with_program(mut self, program: impl AsRef<Path>) -> Self {
        self.program = program.as_ref().to_path_buf();
        self
    }

    fn build(&self) -> Command {
        let mut command = Command::new(&self.program);
        if let Some(dir) = &self.repo_dir {
            command.arg("-C").arg(dir);
        }
        command.args(["tag", "-l"]);
        command
    }

    /// Human-readable command line for diagnostics
    fn describe(&self) -> String {
        match &self.repo_dir {
            Some(dir) => format!("{} -C {} tag -l", self.program.display(), dir.display()),
            None => format!("{} tag -l", self.program.display()),
        }
    }
}

impl Default for GitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl TagSource for GitCommand {
    fn list_tags(&self) -> Result<Vec<String>> {
        debug!(command = %self.describe(), "listing tags");

        let output = self
            .build()
            .output()
            .map_err(|e| ReleaseTagsError::command(self.describe(), e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => output.status.to_string(),
                msg => format!("{}: {}", output.status, msg),
            };
            return Err(ReleaseTagsError::command(self.describe(), reason));
        }

        Ok(parse_tag_list(&output.stdout))
    }
}

/// Split `git tag -l` output into tag names
///
/// Tag names cannot contain whitespace, so any whitespace separates entries.
/// Names that are not UTF-8 cannot be versions and are dropped, the same way
/// libgit2's `tag_names` leaves them out.
pub fn parse_tag_list(output: &[u8]) -> Vec<String> {
    output
        .split(|b| b.is_ascii_whitespace())
        .filter(|name| !name.is_empty())
        .filter_map(|name| match std::str::from_utf8(name) {
            Ok(name) => Some(name.to_string()),
            Err(_) => {
                debug!("skipping non UTF-8 tag {}", String::from_utf8_lossy(name));
                None
            }
        })
        .collect()
}
