use console::style;

use crate::error::ReleaseTagsError;

/// Print an error to stderr. Stdout is reserved for the report itself.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a hint line to stderr below an error
pub fn display_hint(message: &str) {
    eprintln!("{} {}", style("hint:").yellow(), message);
}

/// Suggested next step for an error, if there is one worth printing
pub fn hint_for(error: &ReleaseTagsError) -> Option<&'static str> {
    match error {
        ReleaseTagsError::NoVersions => {
            Some("tags must look like v1.2.3; use --pattern for another naming scheme")
        }
        ReleaseTagsError::NoStableVersion => {
            Some("only prerelease or build-metadata tags exist; tag a release like v1.0.0")
        }
        ReleaseTagsError::ExternalCommand { .. } => {
            Some("is git installed and is this a git repository? try --backend libgit2")
        }
        _ => None,
    }
}

/// Report a failed run on stderr
pub fn display_failure(error: &ReleaseTagsError) {
    display_error(&error.to_string());
    if let Some(hint) = hint_for(error) {
        display_hint(hint);
    }
}
