//! Stable/latest selection over a repository's tags

use crate::domain::{try_parse_version, ParsedVersion, TagPattern};
use crate::error::{ReleaseTagsError, Result};
use crate::git::TagSource;
use std::fmt;
use std::io::Write;
use tracing::debug;

/// The two versions the tool reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Highest version without prerelease or build metadata
    pub stable: ParsedVersion,
    /// Highest version overall, prereleases included
    pub latest: ParsedVersion,
}

impl Report {
    /// Write both lines in a single call so a failed write never leaves
    /// half a report behind
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        out.write_all(self.to_string().as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.stable)?;
        writeln!(f, "{}", self.latest)
    }
}

/// Keep the tags that are release versions, ascending by semver precedence.
///
/// Tags that do not match `pattern` or do not parse are dropped. The sort is
/// stable: versions of equal precedence (differing only in build metadata,
/// or duplicated) keep their input order.
pub fn collect_versions<S: AsRef<str>>(tags: &[S], pattern: &TagPattern) -> Vec<ParsedVersion> {
    let mut versions: Vec<ParsedVersion> = tags
        .iter()
        .filter_map(|tag| match try_parse_version(tag.as_ref(), pattern) {
            Ok(version) => Some(version),
            Err(e) => {
                debug!("skipping {}", e);
                None
            }
        })
        .collect();

    versions.sort_by(|a, b| a.cmp_precedence(b));
    versions
}

/// Pick the highest stable version and the highest version overall.
///
/// Fails with [ReleaseTagsError::NoVersions] when no tag is a version and with
/// [ReleaseTagsError::NoStableVersion] when every version is a prerelease.
pub fn select_stable_and_latest<S: AsRef<str>>(
    tags: &[S],
    pattern: &TagPattern,
) -> Result<Report> {
    let versions = collect_versions(tags, pattern);
    debug!(
        total = tags.len(),
        valid = versions.len(),
        "filtered tags by pattern '{}'",
        pattern.pattern
    );

    let latest = versions.last().cloned().ok_or(ReleaseTagsError::NoVersions)?;
    let stable = versions
        .iter()
        .rev()
        .find(|v| v.is_stable())
        .cloned()
        .ok_or(ReleaseTagsError::NoStableVersion)?;

    Ok(Report { stable, latest })
}

/// Fetch tags from `source` and build the report
pub fn report_from_source(source: &dyn TagSource, pattern: &TagPattern) -> Result<Report> {
    let tags = source.list_tags()?;
    debug!(count = tags.len(), "fetched tags");

    let report = select_stable_and_latest(&tags, pattern)?;
    debug!(stable = %report.stable, latest = %report.latest, "selected versions");
    Ok(report)
}
