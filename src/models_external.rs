use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{MatchFormat, MatchStatus, PlayerRole};

/// Shapes harvested from the Cricbuzz pages before they are
/// reconciled with the stores.

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScrapedTeam {
    pub name: String,
    pub short_name: String,
    pub country: String,
    pub founded_year: Option<u16>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScrapedPlayer {
    pub scraped_id: String,
    pub full_name: String,
    pub role: PlayerRole,
    pub team_name: String,
    pub batting_style: String,
    pub bowling_style: String,
    pub total_runs: u32,
    pub total_wickets: u32,
    pub total_matches: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScrapedMatch {
    pub scraped_match_id: String,
    pub team1_name: String,
    pub team2_name: String,
    pub format: MatchFormat,
    pub tournament: String,
    pub venue: String,
    pub status: MatchStatus,
    pub match_date: DateTime<Utc>,
    pub team1_score: Option<String>,
    pub team2_score: Option<String>,
    pub result: Option<String>,
}

#[derive(Debug, Default)]
pub struct ScrapeHarvest {
    pub teams: Vec<ScrapedTeam>,
    pub players: Vec<ScrapedPlayer>,
    pub matches: Vec<ScrapedMatch>,
}
