use std::fmt;

use serde::Serialize;

use crate::errors::ScrapeError;

/// One of the four game segments. Serializes as the page's round container
/// id so output records match the source site's naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Round {
    #[serde(rename = "jeopardy_round")]
    Jeopardy,
    #[serde(rename = "double_jeopardy_round")]
    DoubleJeopardy,
    #[serde(rename = "triple_jeopardy_round")]
    TripleJeopardy,
    #[serde(rename = "final_jeopardy_round")]
    Final,
}

impl Round {
    /// Maps the round token embedded in a clue identifier, e.g. the "DJ" in
    /// "clue_DJ_6_5".
    pub fn from_token(token: &str) -> Option<Round> {
        match token {
            "J" => Some(Round::Jeopardy),
            "DJ" => Some(Round::DoubleJeopardy),
            "TJ" => Some(Round::TripleJeopardy),
            "FJ" => Some(Round::Final),
            _ => None,
        }
    }

    /// Maps the id of a round container div on the game page.
    pub fn from_container_id(id: &str) -> Option<Round> {
        match id {
            "jeopardy_round" => Some(Round::Jeopardy),
            "double_jeopardy_round" => Some(Round::DoubleJeopardy),
            "triple_jeopardy_round" => Some(Round::TripleJeopardy),
            "final_jeopardy_round" => Some(Round::Final),
            _ => None,
        }
    }

    pub fn container_id(self) -> &'static str {
        match self {
            Round::Jeopardy => "jeopardy_round",
            Round::DoubleJeopardy => "double_jeopardy_round",
            Round::TripleJeopardy => "triple_jeopardy_round",
            Round::Final => "final_jeopardy_round",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.container_id())
    }
}

/// A clue's board position, parsed from its identifier token.
///
/// Non-final identifiers look like `clue_J_1_5`: round token, 1-based
/// category column, then row. The final round is the bare `clue_FJ`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueId {
    pub round: Round,
    pub column: Option<u32>,
    pub row: Option<u32>,
    pub raw: String,
}

impl ClueId {
    pub fn parse(raw: &str) -> Result<ClueId, ScrapeError> {
        let malformed = || ScrapeError::MalformedIdentifier(raw.to_string());

        let mut parts = raw.split('_');
        if parts.next() != Some("clue") {
            return Err(malformed());
        }
        let round = parts
            .next()
            .and_then(Round::from_token)
            .ok_or_else(malformed)?;

        if round == Round::Final {
            // The final round has a single unpositioned clue.
            if parts.next().is_some() {
                return Err(malformed());
            }
            return Ok(ClueId {
                round,
                column: None,
                row: None,
                raw: raw.to_string(),
            });
        }

        let column: u32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .filter(|&c| c > 0)
            .ok_or_else(malformed)?;
        let row: Option<u32> = match parts.next() {
            Some(p) => Some(p.parse().ok().filter(|&r| r > 0).ok_or_else(malformed)?),
            None => None,
        };
        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(ClueId {
            round,
            column: Some(column),
            row,
            raw: raw.to_string(),
        })
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn column(&self) -> Option<u32> {
        self.column
    }
}
