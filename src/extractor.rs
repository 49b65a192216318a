use std::collections::HashMap;

use log::debug;
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::categories::{Category, CategoryTable};
use crate::clue_id::{ClueId, Round};
use crate::errors::ScrapeError;

/// One extracted question record. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clue {
    pub show_num: String,
    pub air_date: String,
    pub round: Round,
    pub category: String,
    pub category_comment: String,
    pub value: Option<String>,
    pub is_daily_double: bool,
    pub clue: String,
    pub correct_response: String,
    pub clue_id: String,
    pub url: String,
}

/// Everything extracted from one game page. `show_num` and `air_date` come
/// from the page title and are constant across the page's clues.
#[derive(Debug, Clone)]
pub struct GameRecords {
    pub show_num: String,
    pub air_date: String,
    pub clues: Vec<Clue>,
}

pub struct PageExtractor {
    show_num_re: Regex,
    air_date_re: Regex,
    response_re: Regex,
}

impl PageExtractor {
    pub fn new() -> Self {
        PageExtractor {
            // Show number appears as "#1234," in the page title
            show_num_re: Regex::new(r"#(\d+),").unwrap(),
            air_date_re: Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap(),
            // The correct response is embedded as markup inside the
            // mouseover handler text
            response_re: Regex::new(r"<em class=.correct_response.>(.*)</em>").unwrap(),
        }
    }

    /// Transforms one game page into its ordered clue records.
    pub fn extract_game(&self, html: &str, url: &str) -> Result<GameRecords, ScrapeError> {
        let document = Html::parse_document(html);

        let (show_num, air_date) = self.parse_title(&document)?;

        let round_sel = Selector::parse(r#"div[id*="jeopardy_round"]"#).unwrap();
        let clue_sel = Selector::parse("td.clue").unwrap();
        let clue_text_sel = Selector::parse("td.clue_text").unwrap();
        let value_sel = Selector::parse(r#"td[class*="clue_value"]"#).unwrap();

        // Category tables for every round on the page are built before any
        // clue is resolved; a clue's identifier decides which table applies.
        let mut rounds = Vec::new();
        let mut tables: HashMap<Round, CategoryTable> = HashMap::new();
        for container in document.select(&round_sel) {
            let Some(round) = container
                .value()
                .attr("id")
                .and_then(Round::from_container_id)
            else {
                continue;
            };
            tables.insert(round, build_category_table(round, container));
            rounds.push(container);
        }

        let mut clues = Vec::new();
        for container in &rounds {
            for cell in container.select(&clue_sel) {
                // An unrevealed board position has no clue text at all
                let Some(text_node) = cell.select(&clue_text_sel).next() else {
                    continue;
                };

                let clue_text = flatten_text(text_node);
                let raw_id = text_node.value().attr("id").ok_or_else(|| {
                    ScrapeError::MalformedIdentifier("clue text without an id".to_string())
                })?;
                let clue_id = ClueId::parse(raw_id)?;

                let raw_value = cell.select(&value_sel).next().map(flatten_text);
                let (value, is_daily_double) = parse_value(raw_value.as_deref());

                let table = tables.get(&clue_id.round()).ok_or_else(|| {
                    ScrapeError::MalformedIdentifier(format!(
                        "clue '{raw_id}' references a round missing from this page"
                    ))
                })?;
                let category = table.lookup(clue_id.column().unwrap_or(1))?;

                let correct_response = self.find_response(&document, &clue_id)?;

                let clue = Clue {
                    show_num: show_num.clone(),
                    air_date: air_date.clone(),
                    round: clue_id.round(),
                    category: category.name.clone(),
                    category_comment: category.comment.clone(),
                    value,
                    is_daily_double,
                    clue: clue_text,
                    correct_response,
                    clue_id: clue_id.raw.clone(),
                    url: url.to_string(),
                };
                debug!("Extracted {}: {}", clue.clue_id, clue.clue);
                clues.push(clue);
            }
        }

        Ok(GameRecords {
            show_num,
            air_date,
            clues,
        })
    }

    fn parse_title(&self, document: &Html) -> Result<(String, String), ScrapeError> {
        let title_sel = Selector::parse("head > title").unwrap();
        let title: String = document
            .select(&title_sel)
            .next()
            .map(|t| t.text().collect())
            .ok_or_else(|| ScrapeError::TitleParse("page has no title".to_string()))?;

        let show_num = self
            .show_num_re
            .captures(&title)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ScrapeError::TitleParse(format!("no show number in '{title}'")))?;
        let air_date = self
            .air_date_re
            .find(&title)
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ScrapeError::TitleParse(format!("no air date in '{title}'")))?;

        Ok((show_num, air_date))
    }

    /// The response is revealed by a mouseover handler: find the element
    /// whose handler references this clue, cut the response markup out of
    /// the handler text, then flatten that markup to plain text.
    fn find_response(&self, document: &Html, clue_id: &ClueId) -> Result<String, ScrapeError> {
        let handler_sel = Selector::parse("div[onmouseover]").unwrap();

        let handler = document
            .select(&handler_sel)
            .filter_map(|e| e.value().attr("onmouseover"))
            .find(|attr| attr.contains(&clue_id.raw))
            .ok_or_else(|| ScrapeError::ResponseNotFound(clue_id.raw.clone()))?;

        let embedded = self
            .response_re
            .captures(handler)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| ScrapeError::ResponseNotFound(clue_id.raw.clone()))?;

        // Responses sometimes carry emphasis markup of their own
        let fragment = Html::parse_fragment(embedded);
        Ok(flatten_text(fragment.root_element()))
    }
}

impl Default for PageExtractor {
    fn default() -> Self {
        PageExtractor::new()
    }
}

fn build_category_table(round: Round, container: ElementRef) -> CategoryTable {
    let category_sel = Selector::parse("td.category").unwrap();
    let name_sel = Selector::parse("td.category_name").unwrap();
    let comment_sel = Selector::parse("td.category_comments").unwrap();

    let mut categories = Vec::new();
    for cell in container.select(&category_sel) {
        let name = cell
            .select(&name_sel)
            .next()
            .map(flatten_text)
            .unwrap_or_default();
        let comment = cell
            .select(&comment_sel)
            .next()
            .map(flatten_text)
            .unwrap_or_default();
        categories.push(Category { name, comment });
    }
    CategoryTable::build(round, categories)
}

/// Text content of a node and its descendants, with `<br>` mapped to a
/// newline and all other markup dropped. Used for clue text, category
/// cells, and response markup alike.
fn flatten_text(root: ElementRef) -> String {
    let mut out = String::new();
    for node in root.descendants() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) if element.name() == "br" => out.push('\n'),
            _ => {}
        }
    }
    out
}

/// Splits a raw board value into the displayed amount and the daily-double
/// flag. A missing value is never a daily double.
fn parse_value(raw: Option<&str>) -> (Option<String>, bool) {
    match raw {
        None => (None, false),
        Some(raw) => {
            let trimmed = raw.trim();
            match trimmed.strip_prefix("DD") {
                Some(rest) => {
                    let rest = rest.trim_start();
                    let rest = rest.strip_prefix(':').unwrap_or(rest);
                    (Some(rest.trim().to_string()), true)
                }
                None => (Some(trimmed.to_string()), false),
            }
        }
    }
}
