use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::ScrapeError;

/// One season's discovery output: the season landing page plus the full
/// ordered list of game URLs archived under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub title: String,
    pub url: String,
    pub count: usize,
    pub game_urls: Vec<String>,
    pub accessed_at: String,
}

/// The job-list metadata file produced by the discovery crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveMetadata {
    pub title: String,
    pub url: String,
    pub seasons: Vec<Season>,
    pub accessed_at: String,
}

/// A single fetch job. Immutable once enqueued; consumed by exactly one
/// worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub game_id: String,
    pub season_title: String,
    pub url: String,
}

pub fn load_metadata<P: AsRef<Path>>(path: P) -> Result<ArchiveMetadata, ScrapeError> {
    let content = fs::read_to_string(path.as_ref())?;
    let metadata: ArchiveMetadata = serde_json::from_str(&content)?;
    info!(
        "Loaded job list from {:?}: {} seasons",
        path.as_ref(),
        metadata.seasons.len()
    );
    Ok(metadata)
}

/// Flattens the metadata into fetch jobs. A game URL without a game id is
/// logged and skipped rather than aborting the run.
pub fn jobs_from_metadata(metadata: &ArchiveMetadata) -> Vec<Job> {
    let mut jobs = Vec::new();
    for season in &metadata.seasons {
        for game_url in &season.game_urls {
            match game_id_from_url(game_url) {
                Some(game_id) => jobs.push(Job {
                    game_id,
                    season_title: season.title.clone(),
                    url: game_url.clone(),
                }),
                None => warn!("Skipping game url without a game_id: {}", game_url),
            }
        }
    }
    info!(
        "Collected {} games across {} seasons",
        jobs.len(),
        metadata.seasons.len()
    );
    jobs
}

fn game_id_from_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "game_id")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_id_comes_from_query_param() {
        assert_eq!(
            game_id_from_url("https://example.com/showgame.php?game_id=7040"),
            Some("7040".to_string())
        );
        assert_eq!(
            game_id_from_url("https://example.com/showgame.php?foo=1&game_id=9"),
            Some("9".to_string())
        );
        assert_eq!(game_id_from_url("https://example.com/showgame.php"), None);
        assert_eq!(game_id_from_url("showgame.php?game_id=7040"), None);
    }

    #[test]
    fn jobs_flatten_all_seasons() {
        let metadata = ArchiveMetadata {
            title: "archive".to_string(),
            url: "https://example.com/".to_string(),
            seasons: vec![
                Season {
                    title: "Season 1".to_string(),
                    url: "https://example.com/showseason.php?season=1".to_string(),
                    count: 2,
                    game_urls: vec![
                        "https://example.com/showgame.php?game_id=1".to_string(),
                        "https://example.com/showgame.php?game_id=2".to_string(),
                    ],
                    accessed_at: "2024-01-01T00:00:00".to_string(),
                },
                Season {
                    title: "Season 2".to_string(),
                    url: "https://example.com/showseason.php?season=2".to_string(),
                    count: 1,
                    game_urls: vec!["https://example.com/showgame.php?game_id=3".to_string()],
                    accessed_at: "2024-01-01T00:00:00".to_string(),
                },
            ],
            accessed_at: "2024-01-01T00:00:00".to_string(),
        };

        let jobs = jobs_from_metadata(&metadata);
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].game_id, "1");
        assert_eq!(jobs[0].season_title, "Season 1");
        assert_eq!(jobs[2].game_id, "3");
        assert_eq!(jobs[2].season_title, "Season 2");
    }

    #[test]
    fn urls_without_game_id_are_skipped() {
        let metadata = ArchiveMetadata {
            title: "archive".to_string(),
            url: "https://example.com/".to_string(),
            seasons: vec![Season {
                title: "Season 1".to_string(),
                url: "https://example.com/showseason.php?season=1".to_string(),
                count: 2,
                game_urls: vec![
                    "https://example.com/other.php".to_string(),
                    "https://example.com/showgame.php?game_id=5".to_string(),
                ],
                accessed_at: "2024-01-01T00:00:00".to_string(),
            }],
            accessed_at: "2024-01-01T00:00:00".to_string(),
        };

        let jobs = jobs_from_metadata(&metadata);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].game_id, "5");
    }

    #[test]
    fn metadata_round_trips_through_json() {
        let json = r#"{
            "title": "archive",
            "url": "https://example.com/",
            "seasons": [{
                "title": "Season 1",
                "url": "https://example.com/showseason.php?season=1",
                "count": 1,
                "game_urls": ["https://example.com/showgame.php?game_id=1"],
                "accessed_at": "2024-01-01T00:00:00"
            }],
            "accessed_at": "2024-01-01T00:00:00"
        }"#;

        let metadata: ArchiveMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.seasons[0].count, 1);
        let back = serde_json::to_string(&metadata).unwrap();
        assert!(back.contains("game_id=1"));
    }
}
