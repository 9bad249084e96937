use crate::error::{ReleaseTagsError, Result};
use regex::Regex;

/// Placeholder marking where the version sits inside a tag name
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Tag pattern used when none is configured: a literal `v` followed by the version
pub const DEFAULT_TAG_PATTERN: &str = "v{version}";

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
///
/// The literal text around the placeholder must match exactly; whatever sits
/// in place of `{version}` is handed to the version parser untouched.
#[derive(Debug, Clone)]
pub struct TagPattern {
    pub pattern: String,
    regex: Regex,
}

impl TagPattern {
    /// Compile a tag pattern. The pattern must contain `{version}` exactly once.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();

        match pattern.matches(VERSION_PLACEHOLDER).count() {
            1 => {}
            0 => {
                return Err(ReleaseTagsError::config(format!(
                    "Tag pattern '{}' must contain {} placeholder",
                    pattern, VERSION_PLACEHOLDER
                )))
            }
            _ => {
                return Err(ReleaseTagsError::config(format!(
                    "Tag pattern '{}' contains {} more than once",
                    pattern, VERSION_PLACEHOLDER
                )))
            }
        }

        // Escape everything, then turn the escaped placeholder into a capture group
        let escaped = regex::escape(&pattern);
        let regex_pattern = escaped.replace(r"\{version\}", r"(.+)");

        let regex = Regex::new(&format!("^{}$", regex_pattern)).map_err(|e| {
            ReleaseTagsError::config(format!("Invalid tag pattern '{}': {}", pattern, e))
        })?;

        Ok(TagPattern { pattern, regex })
    }

    /// Return the text standing in for `{version}`, or `None` if the tag does
    /// not match the pattern's literal parts
    pub fn extract<'a>(&self, tag: &'a str) -> Option<&'a str> {
        self.regex
            .captures(tag)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern::new(DEFAULT_TAG_PATTERN).expect("default tag pattern compiles")
    }
}

impl PartialEq for TagPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for TagPattern {}
