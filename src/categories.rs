use crate::clue_id::Round;
use crate::errors::ScrapeError;

/// A category heading: name plus the host's comment, which is often empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub comment: String,
}

/// The ordered category headings of one round, captured once per page and
/// immutable afterwards. Index 0 is board column 1.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    round: Round,
    categories: Vec<Category>,
}

impl CategoryTable {
    pub fn build(round: Round, categories: Vec<Category>) -> CategoryTable {
        CategoryTable { round, categories }
    }

    /// Resolves a 1-based board column. The final round has a single
    /// category and ignores the column entirely.
    pub fn lookup(&self, column: u32) -> Result<&Category, ScrapeError> {
        let index = match self.round {
            Round::Final => 0,
            _ => (column as usize)
                .checked_sub(1)
                .ok_or_else(|| self.out_of_range(column))?,
        };
        self.categories
            .get(index)
            .ok_or_else(|| self.out_of_range(column))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn out_of_range(&self, column: u32) -> ScrapeError {
        ScrapeError::CategoryIndexOutOfRange {
            round: self.round,
            column,
            count: self.categories.len(),
        }
    }
}
