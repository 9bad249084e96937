//! Domain logic - pure rules for tags and versions, independent of git

pub mod tag;
pub mod version;

pub use tag::{TagPattern, DEFAULT_TAG_PATTERN};
pub use version::{cmp_precedence, try_parse_version, ParseError, ParsedVersion};
