//! Resolve a person's full name to author identities recorded under
//! transliterated or initials-only name forms.
//!
//! An [`AuthorIndex`] is built once from article records, then shared by a
//! [`NameMatcher`] that answers queries against it:
//!
//! 1. exact path: the query rendered as `"surname, a.b."` exists in the index;
//! 2. fallback: every key with agreeing initials is scored on letter-level
//!    distance and similarity, under a length-ratio guard.

pub mod config;
pub mod error;
pub mod index;
pub mod matcher;
pub mod names;
pub mod record;
pub mod similarity;
pub mod translit;

#[cfg(feature = "python")]
mod python;

pub use config::{Config, IndexConfig, MatchThresholds};
pub use error::{ConfigError, DegenerateInputError, ExtractionError, RecordError};
pub use index::{AuthorIndex, BuildStats};
pub use matcher::{MatchPath, MatchResult, NameMatcher};
pub use record::{extract_author_id, read_json_lines, ArticleRecord};
pub use translit::{Translify, Transliterate};
