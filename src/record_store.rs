use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::errors::ScrapeError;
use crate::extractor::GameRecords;
use crate::input_loader::Job;

const ARTIFACT_SUFFIX: &str = "_output.csv";

/// Writes one CSV artifact per captured game and recovers the set of
/// captured game ids from artifact names alone, without reading contents.
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, ScrapeError> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(RecordStore {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    /// Writes the game's full record set as a single artifact. Called once
    /// per job, never with a partial record set.
    pub fn persist(&self, job: &Job, game: &GameRecords) -> Result<PathBuf, ScrapeError> {
        let name = artifact_name(
            &game.air_date,
            &game.show_num,
            &job.season_title,
            &job.game_id,
        );
        let path = self.dir.join(&name);

        let mut writer = csv::Writer::from_path(&path)?;
        for clue in &game.clues {
            writer.serialize(clue)?;
        }
        writer.flush()?;

        info!(
            "Wrote {} clues for game {} to {}",
            game.clues.len(),
            job.game_id,
            path.display()
        );
        Ok(path)
    }

    /// Game ids already present in the store, recovered from the trailing
    /// name segment of each artifact.
    pub fn captured_game_ids(&self) -> Result<HashSet<String>, ScrapeError> {
        let mut captured = HashSet::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let Some(stem) = name.strip_suffix(ARTIFACT_SUFFIX) else {
                continue;
            };
            if let Some(game_id) = stem.rsplit('-').next() {
                if !game_id.is_empty() {
                    captured.insert(game_id.to_string());
                }
            }
        }
        Ok(captured)
    }
}

/// Artifact naming: `{air_date}-{show_num}-{season_slug}-{game_id}_output.csv`.
/// The game id comes last so it can be recovered from the name.
fn artifact_name(air_date: &str, show_num: &str, season_title: &str, game_id: &str) -> String {
    format!(
        "{air_date}-{show_num}-{}-{game_id}{ARTIFACT_SUFFIX}",
        to_lower_underscore(season_title)
    )
}

/// Lowercases, joins whitespace runs with a single underscore, and drops
/// anything that is not alphanumeric or underscore.
fn to_lower_underscore(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_lowercase()
}
