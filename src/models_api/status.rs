use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthRsp {
    pub status: String,
    pub time: DateTime<Utc>,
    pub last_update: Option<DateTime<Utc>>,
    pub scraping: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatusRsp {
    pub scraping: bool,
    pub last_update: Option<DateTime<Utc>>,
    pub teams_count: usize,
    pub players_count: usize,
    pub matches_count: usize,
}
