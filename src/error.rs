use thiserror::Error;

/// Unified error type for release-tags operations
#[derive(Error, Debug)]
pub enum ReleaseTagsError {
    #[error("Tag listing command `{command}` failed: {reason}")]
    ExternalCommand { command: String, reason: String },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("No tag matches a valid semantic version")]
    NoVersions,

    #[error("No stable (non-prerelease) version tag found")]
    NoStableVersion,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-tags
pub type Result<T> = std::result::Result<T, ReleaseTagsError>;

impl ReleaseTagsError {
    /// Create an external command error with context
    pub fn command(command: impl Into<String>, reason: impl Into<String>) -> Self {
        ReleaseTagsError::ExternalCommand {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseTagsError::Config(msg.into())
    }

    /// Process exit code for this error
    ///
    /// * `1` - nothing to report (no versions, no stable version) or output failed
    /// * `2` - bad configuration
    /// * `3` - the tag source failed
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseTagsError::NoVersions
            | ReleaseTagsError::NoStableVersion
            | ReleaseTagsError::Io(_) => 1,
            ReleaseTagsError::Config(_) => 2,
            ReleaseTagsError::ExternalCommand { .. } | ReleaseTagsError::Git(_) => 3,
        }
    }
}
