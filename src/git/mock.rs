use crate::error::{ReleaseTagsError, Result};
use crate::git::TagSource;

/// Mock tag source for testing without a repository
#[derive(Debug, Default)]
pub struct MockRepository {
    tags: Vec<String>,
    failure: Option<String>,
}

impl MockRepository {
    /// Create a new mock repository with no tags
    pub fn new() -> Self {
        MockRepository::default()
    }

    /// Create a mock repository holding `tags`, in the given order
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockRepository {
            tags: tags.into_iter().map(Into::into).collect(),
            failure: None,
        }
    }

    /// Add a tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Make every `list_tags` call fail as if the git command had exited non-zero
    pub fn fail_with(&mut self, reason: impl Into<String>) {
        self.failure = Some(reason.into());
    }
}

impl TagSource for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        match &self.failure {
            Some(reason) => Err(ReleaseTagsError::command("git tag -l", reason.clone())),
            None => Ok(self.tags.clone()),
        }
    }
}
