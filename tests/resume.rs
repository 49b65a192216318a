use std::collections::HashSet;
use std::fs;

use trivia_scraper_lib::{resume, Job, PageExtractor, RecordStore};

const PAGE: &str = r#"<html>
<head><title>J! Archive - Show #77, aired 1999-05-06</title></head>
<body>
<div id="jeopardy_round">
  <table>
    <tr><td class="category"><table><tr><td class="category_name">RIVERS</td></tr></table></td></tr>
    <tr><td class="clue">
      <div onmouseover="toggle('clue_J_1_1', 'clue_J_1_1_stuck', '&lt;em class=&quot;correct_response&quot;&gt;the Nile&lt;/em&gt;')">
        <table>
          <tr><td class="clue_value">$100</td></tr>
          <tr><td id="clue_J_1_1" class="clue_text">Longest African river</td></tr>
        </table>
      </div>
    </td></tr>
  </table>
</div>
</body>
</html>"#;

fn job(game_id: &str) -> Job {
    Job {
        game_id: game_id.to_string(),
        season_title: "Season 15".to_string(),
        url: format!("https://j-archive.com/showgame.php?game_id={game_id}"),
    }
}

#[test]
fn second_run_over_captured_store_has_empty_pending_set() {
    let temp = tempfile::tempdir().unwrap();
    let store = RecordStore::new(temp.path()).unwrap();
    let extractor = PageExtractor::new();

    let jobs: Vec<Job> = ["1", "2", "3"].iter().map(|id| job(id)).collect();

    // First run: everything pending, every game persisted
    let captured = store.captured_game_ids().unwrap();
    let pending = resume::pending_jobs(jobs.clone(), &captured);
    assert_eq!(pending.len(), 3);
    for j in &pending {
        let game = extractor.extract_game(PAGE, &j.url).unwrap();
        store.persist(j, &game).unwrap();
    }

    // Second run: nothing pending, artifacts untouched
    let artifacts_before: HashSet<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();

    let captured = store.captured_game_ids().unwrap();
    assert_eq!(captured.len(), 3);
    let pending = resume::pending_jobs(jobs, &captured);
    assert!(pending.is_empty());

    let artifacts_after: HashSet<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(artifacts_before, artifacts_after);
}

#[test]
fn partially_captured_store_queues_only_the_missing_games() {
    let temp = tempfile::tempdir().unwrap();
    let store = RecordStore::new(temp.path()).unwrap();
    let extractor = PageExtractor::new();

    let jobs: Vec<Job> = ["1", "2", "3"].iter().map(|id| job(id)).collect();

    for j in &jobs[..2] {
        let game = extractor.extract_game(PAGE, &j.url).unwrap();
        store.persist(j, &game).unwrap();
    }

    let captured = store.captured_game_ids().unwrap();
    let pending = resume::pending_jobs(jobs, &captured);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].game_id, "3");
}
