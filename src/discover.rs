//! Discovery crawl: walks the archive's season list, collects every game
//! URL per season, and writes the job-list metadata file the scrape
//! pipeline consumes.

use std::fs;
use std::process::ExitCode;
use std::thread;

use chrono::Local;
use log::{error, info};
use scraper::{Html, Selector};
use url::Url;

use trivia_scraper_lib::{logger, ArchiveMetadata, Config, PageFetcher, Season};

const ARCHIVE_BASE: &str = "https://j-archive.com/";
const SEASON_LIST_URL: &str = "https://j-archive.com/listseasons.php";

fn main() -> ExitCode {
    logger::init();
    let config = Config::from_env();

    let fetcher = PageFetcher::new();
    info!("Fetching season list from {}", SEASON_LIST_URL);
    let html = match fetcher.fetch(SEASON_LIST_URL) {
        Ok((html, _)) => html,
        Err(e) => {
            error!("Failed to fetch season list: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let links = season_links(&html);
    info!("Found {} seasons", links.len());

    let mut seasons = Vec::new();
    for (title, url) in links {
        match fetcher.fetch(&url) {
            Ok((html, _)) => {
                let game_urls = game_links(&html);
                info!("Season '{}': {} games archived", title, game_urls.len());
                seasons.push(Season {
                    title,
                    url,
                    count: game_urls.len(),
                    game_urls,
                    accessed_at: Local::now().to_rfc3339(),
                });
            }
            // One broken season page should not sink the whole crawl
            Err(e) => error!("Failed to fetch season '{}': {}", title, e),
        }
        thread::sleep(config.job_delay);
    }

    let metadata = ArchiveMetadata {
        title: "Trivia clues and responses from the J! Archive".to_string(),
        url: ARCHIVE_BASE.to_string(),
        seasons,
        accessed_at: Local::now().to_rfc3339(),
    };

    let json = match serde_json::to_string_pretty(&metadata) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize metadata: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = fs::write(&config.metadata_path, json) {
        error!(
            "Failed to write metadata to {:?}: {}",
            config.metadata_path, e
        );
        return ExitCode::FAILURE;
    }

    info!(
        "Saved metadata for {} seasons to {:?}",
        metadata.seasons.len(),
        config.metadata_path
    );
    ExitCode::SUCCESS
}

/// Season landing-page links, skipping the duplicate shortcut entries the
/// list page carries for the newest seasons.
fn season_links(html: &str) -> Vec<(String, String)> {
    let document = Html::parse_document(html);
    let link_sel = Selector::parse(r#"a[href*="showseason.php?season="]"#).unwrap();
    let base = Url::parse(ARCHIVE_BASE).unwrap();

    let mut links = Vec::new();
    for anchor in document.select(&link_sel) {
        let text = anchor.text().collect::<String>().trim().to_string();
        if text.is_empty() || text == "[current season]" || text == "[last season]" {
            continue;
        }
        if let Some(href) = anchor.value().attr("href") {
            if let Ok(absolute) = base.join(href) {
                links.push((text, absolute.to_string()));
            }
        }
    }
    links
}

/// Game links from one season page, in the page's (chronological) order.
fn game_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_sel = Selector::parse(r#"td[align="left"] > a[href*="showgame.php?game_id="]"#).unwrap();
    let base = Url::parse(ARCHIVE_BASE).unwrap();

    let mut links = Vec::new();
    for anchor in document.select(&link_sel) {
        if let Some(href) = anchor.value().attr("href") {
            if let Ok(absolute) = base.join(href) {
                links.push(absolute.to_string());
            }
        }
    }
    links
}
