pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod report;
pub mod ui;

pub use error::{ReleaseTagsError, Result};
pub use report::{select_stable_and_latest, Report};
