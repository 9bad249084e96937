use crate::error::Result;
use crate::git::TagSource;
use git2::Repository as Git2Repo;
use std::path::Path;
use std::sync::Mutex;

/// Reads tag names in-process through libgit2
pub struct Git2Repository {
    // git2::Repository is Send but not Sync
    repo: Mutex<Git2Repo>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo: Mutex::new(repo),
        }
    }
}

impl TagSource for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let repo = self
            .repo
            .lock()
            .map_err(|_| git2::Error::from_str("repository lock poisoned"))?;
        let tags = repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }
}
