use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::log;

use crate::db::Db;
use crate::models::{MatchFormat, MatchStatus};
use crate::models_external::ScrapedMatch;
use crate::team_service::TeamService;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StoredMatch {
    pub id: u32,
    pub scraped_match_id: String,
    pub team1: String,
    pub team2: String,
    pub format: MatchFormat,
    pub tournament: String,
    pub venue: String,
    pub status: MatchStatus,
    pub match_date: DateTime<Utc>,
    pub team1_score: Option<String>,
    pub team2_score: Option<String>,
    pub result: Option<String>,
}

impl StoredMatch {
    pub fn display_info(&self) -> String {
        format!("{} vs {} - {}", self.team1, self.team2, self.format)
    }
}

pub struct MatchService;

impl MatchService {
    /// Most recent first.
    pub fn read_all() -> Vec<StoredMatch> {
        let mut matches = MatchService::get_db().read_all();
        matches.sort_by(|a, b| b.match_date.cmp(&a.match_date));
        matches
    }

    pub fn read(id: u32) -> Option<StoredMatch> {
        MatchService::get_db().read(&id)
    }

    pub fn count() -> usize {
        MatchService::get_db().read_all().len()
    }

    /// Upsert by scraped match id, returns the number of new matches.
    /// Matches between unknown teams are skipped.
    pub fn upsert_all(matches: &[ScrapedMatch]) -> usize {
        let db = MatchService::get_db();
        let existing = db.read_all();
        let mut next_id = existing.iter().map(|m| m.id).max().unwrap_or(0) + 1;

        let mut added = 0;
        for m in matches {
            if !TeamService::exists(&m.team1_name) || !TeamService::exists(&m.team2_name) {
                continue;
            }
            let stored = match existing.iter().find(|e| e.scraped_match_id == m.scraped_match_id) {
                Some(current) => StoredMatch {
                    match_date: m.match_date,
                    status: m.status,
                    team1_score: m.team1_score.clone(),
                    team2_score: m.team2_score.clone(),
                    result: m.result.clone(),
                    ..current.clone()
                },
                None => {
                    let id = next_id;
                    next_id += 1;
                    added += 1;
                    StoredMatch {
                        id,
                        scraped_match_id: m.scraped_match_id.clone(),
                        team1: m.team1_name.clone(),
                        team2: m.team2_name.clone(),
                        format: m.format,
                        tournament: m.tournament.clone(),
                        venue: m.venue.clone(),
                        status: m.status,
                        match_date: m.match_date,
                        team1_score: m.team1_score.clone(),
                        team2_score: m.team2_score.clone(),
                        result: m.result.clone(),
                    }
                }
            };
            _ = db.write(&stored.id, &stored);
        }
        added
    }

    /// Live matches don't run forever. Anything live for longer than
    /// `stale_after` gets flipped to completed.
    pub fn complete_stale(stale_after: Duration) -> usize {
        let db = MatchService::get_db();
        let cutoff = Utc::now() - stale_after;

        let mut completed = 0;
        for mut m in db.read_all() {
            if m.status == MatchStatus::Live && m.match_date < cutoff {
                m.status = MatchStatus::Completed;
                _ = db.write(&m.id, &m);
                completed += 1;
            }
        }
        if completed > 0 {
            log::info!("[MATCH] Completed {completed} stale live matches");
        }
        completed
    }

    pub fn seed_if_empty() {
        let db = MatchService::get_db();
        if !db.read_all().is_empty() {
            return;
        }
        let sample = ScrapedMatch {
            scraped_match_id: "seed_match_1".to_string(),
            team1_name: "India".to_string(),
            team2_name: "Australia".to_string(),
            format: MatchFormat::ODI,
            tournament: "ICC Cricket World Cup 2023".to_string(),
            venue: "Wankhede Stadium, Mumbai".to_string(),
            status: MatchStatus::Completed,
            match_date: Utc::now() - Duration::days(30),
            team1_score: Some("326/5".to_string()),
            team2_score: Some("289/10".to_string()),
            result: Some("India won by 37 runs".to_string()),
        };
        MatchService::upsert_all(&[sample]);
    }

    fn get_db() -> Db<u32, StoredMatch> {
        Db::new("v1_matches")
    }
}
