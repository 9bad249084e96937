use crate::domain::tag::TagPattern;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Why a tag was not accepted as a release version.
///
/// Never fatal: callers drop the tag and move on.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("tag '{tag}' does not match pattern '{pattern}'")]
    PatternMismatch { tag: String, pattern: String },

    #[error("tag '{tag}' is not a semantic version: {source}")]
    InvalidSemver {
        tag: String,
        #[source]
        source: semver::Error,
    },
}

/// A tag that parsed as a semantic version
///
/// `text` is the version as written in the tag, without the pattern's literal
/// parts. It is what gets reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVersion {
    pub text: String,
    pub version: semver::Version,
}

impl ParsedVersion {
    /// Parse bare version text (no prefix), e.g. "1.2.0-beta"
    pub fn parse(text: &str) -> std::result::Result<Self, semver::Error> {
        let version = semver::Version::parse(text)?;
        Ok(ParsedVersion {
            text: text.to_string(),
            version,
        })
    }

    /// A version is stable when writing out only its `major.minor.patch`
    /// reproduces the original text, i.e. it carries neither a prerelease
    /// nor build metadata.
    pub fn is_stable(&self) -> bool {
        let core = format!(
            "{}.{}.{}",
            self.version.major, self.version.minor, self.version.patch
        );
        core == self.text
    }

    /// Semantic-version precedence. Build metadata does not take part.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        cmp_precedence(&self.version, &other.version)
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Compare two versions by semver precedence.
///
/// Major, minor and patch compare numerically. A prerelease sorts below the
/// release it precedes; prerelease identifiers follow `semver::Prerelease`
/// ordering (numeric < alphanumeric, shorter prefix first). Build metadata is
/// ignored, so `1.0.0+a` and `1.0.0+b` compare equal.
pub fn cmp_precedence(a: &semver::Version, b: &semver::Version) -> Ordering {
    a.major
        .cmp(&b.major)
        .then(a.minor.cmp(&b.minor))
        .then(a.patch.cmp(&b.patch))
        .then_with(|| a.pre.cmp(&b.pre))
}

/// Try to read a release version out of a raw tag.
///
/// The tag must match `pattern` (by default: start with a literal `v`) and the
/// rest must be a valid semantic version. Any valid version satisfies
/// `>= 0.0.0`, so parse success is the whole check.
pub fn try_parse_version(
    tag: &str,
    pattern: &TagPattern,
) -> std::result::Result<ParsedVersion, ParseError> {
    let text = pattern
        .extract(tag)
        .ok_or_else(|| ParseError::PatternMismatch {
            tag: tag.to_string(),
            pattern: pattern.pattern.clone(),
        })?;

    ParsedVersion::parse(text).map_err(|source| ParseError::InvalidSemver {
        tag: tag.to_string(),
        source,
    })
}
