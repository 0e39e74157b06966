//! Error types for index building, matching and configuration

use std::path::PathBuf;

use thiserror::Error;

/// Failure to pull an author identifier out of a profile link
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("link has {len} characters, identifier offset is {offset}")]
    LinkTooShort { len: usize, offset: usize },
    #[error("no '{delimiter}' after offset {offset}")]
    MissingDelimiter { offset: usize, delimiter: char },
    #[error("empty identifier at offset {offset}")]
    EmptyIdentifier { offset: usize },
}

/// Reason a whole article record is left out of the index
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("{names} author names but {links} profile links")]
    LengthMismatch { names: usize, links: usize },
    #[error("author name at position {position} is blank")]
    BlankName { position: usize },
    #[error("bad profile link at position {position}: {source}")]
    Extraction {
        position: usize,
        #[source]
        source: ExtractionError,
    },
    #[error("invalid JSON record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed record: {0}")]
    Malformed(String),
    #[error("failed to read record line: {0}")]
    Io(#[from] std::io::Error),
}

/// Input the similarity pipeline cannot score; the candidate is treated as a non-match
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DegenerateInputError {
    #[error("query is empty")]
    EmptyQuery,
    #[error("nothing left to compare after keeping letters only")]
    EmptyLetters,
    #[error("token {position} is empty")]
    EmptyToken { position: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}
