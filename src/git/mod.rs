//! Tag source abstraction layer
//!
//! The reporter only needs one thing from version control: the names of all
//! tags in a repository. [TagSource] captures that, with these implementations:
//!
//! - [command::GitCommand]: runs `git tag -l` as a child process (the default)
//! - [repository::Git2Repository]: reads tags in-process through the `git2` crate
//! - [mock::MockRepository]: an in-memory tag list for testing
//!
//! ```rust
//! # use release_tags::git::{MockRepository, TagSource};
//! let repo = MockRepository::with_tags(["v1.0.0", "v1.1.0-rc.1"]);
//! let tags = repo.list_tags().unwrap();
//! assert_eq!(tags.len(), 2);
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCommand;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::{ReleaseTagsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Read-only access to a repository's tag names
///
/// ## Error Handling
///
/// Implementations report failures of the underlying mechanism (a command that
/// cannot run or exits non-zero, a repository that cannot be opened) as
/// [crate::error::ReleaseTagsError] variants. An empty repository is not an
/// error: it yields an empty list.
pub trait TagSource: Send + Sync {
    /// Get all tag names in the repository
    ///
    /// Order is unspecified and duplicates are allowed; callers sort and filter.
    fn list_tags(&self) -> Result<Vec<String>>;
}

impl<T: TagSource + ?Sized> TagSource for Box<T> {
    fn list_tags(&self) -> Result<Vec<String>> {
        (**self).list_tags()
    }
}

/// Which [TagSource] implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Shell out to the `git` binary
    #[default]
    Git,
    /// Read the repository in-process with libgit2
    Libgit2,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Git => f.write_str("git"),
            Backend::Libgit2 => f.write_str("libgit2"),
        }
    }
}

impl FromStr for Backend {
    type Err = ReleaseTagsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "git" => Ok(Backend::Git),
            "libgit2" | "git2" => Ok(Backend::Libgit2),
            other => Err(ReleaseTagsError::config(format!(
                "Unknown backend '{}' (expected 'git' or 'libgit2')",
                other
            ))),
        }
    }
}

/// Build the tag source for `backend`, rooted at `repo` when given
pub fn open_tag_source(backend: Backend, repo: Option<&Path>) -> Result<Box<dyn TagSource>> {
    match backend {
        Backend::Git => {
            let command = match repo {
                Some(path) => GitCommand::in_dir(path),
                None => GitCommand::new(),
            };
            Ok(Box::new(command))
        }
        Backend::Libgit2 => {
            let repository = Git2Repository::open(repo.unwrap_or_else(|| Path::new(".")))?;
            Ok(Box::new(repository))
        }
    }
}
