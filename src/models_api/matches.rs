use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::match_service::StoredMatch;
use crate::models::{MatchFormat, MatchStatus};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiMatch {
    pub id: u32,
    pub team1: String,
    pub team2: String,
    pub format: MatchFormat,
    pub tournament: String,
    pub venue: String,
    pub status: MatchStatus,
    pub match_date: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1_score: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2_score: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl From<StoredMatch> for ApiMatch {
    fn from(value: StoredMatch) -> Self {
        ApiMatch {
            id: value.id,
            team1: value.team1,
            team2: value.team2,
            format: value.format,
            tournament: value.tournament,
            venue: value.venue,
            status: value.status,
            match_date: value.match_date,
            team1_score: value.team1_score,
            team2_score: value.team2_score,
            result: value.result,
        }
    }
}
