use serde::{Deserialize, Serialize};

use crate::models::PlayerRole;
use crate::player_service::StoredPlayer;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiPlayer {
    pub id: u32,
    pub name: String,
    pub role: PlayerRole,
    pub team: String,
    pub total_runs: u32,
    pub total_wickets: u32,
    pub total_matches: u32,
}

impl From<StoredPlayer> for ApiPlayer {
    fn from(value: StoredPlayer) -> Self {
        ApiPlayer {
            id: value.id,
            name: value.name,
            role: value.role,
            team: value.team,
            total_runs: value.total_runs,
            total_wickets: value.total_wickets,
            total_matches: value.total_matches,
        }
    }
}
