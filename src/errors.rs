use std::io;

use thiserror::Error;

use crate::clue_id::Round;

/// Error type for fetch, extraction, and persistence failures.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("malformed clue identifier '{0}'")]
    MalformedIdentifier(String),
    #[error("category column {column} out of range for {round} ({count} categories)")]
    CategoryIndexOutOfRange {
        round: Round,
        column: u32,
        count: usize,
    },
    #[error("unparseable page title: {0}")]
    TitleParse(String),
    #[error("no correct response found for clue '{0}'")]
    ResponseNotFound(String),
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("record write failure: {0}")]
    Csv(#[from] csv::Error),
    #[error("metadata parse failure: {0}")]
    Metadata(#[from] serde_json::Error),
}
