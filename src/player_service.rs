use serde::{Deserialize, Serialize};

use crate::db::Db;
use crate::models::PlayerRole;
use crate::models_external::ScrapedPlayer;
use crate::team_service::TeamService;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StoredPlayer {
    pub id: u32,
    pub scraped_id: String,
    pub name: String,
    pub role: PlayerRole,
    pub team: String,
    pub batting_style: String,
    pub bowling_style: String,
    pub total_runs: u32,
    pub total_wickets: u32,
    pub total_matches: u32,
}

pub struct PlayerService;

impl PlayerService {
    pub fn read_all() -> Vec<StoredPlayer> {
        let mut players = PlayerService::get_db().read_all();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        players
    }

    pub fn read(id: u32) -> Option<StoredPlayer> {
        PlayerService::get_db().read(&id)
    }

    pub fn count() -> usize {
        PlayerService::get_db().read_all().len()
    }

    /// Upsert by scraped id. Players of unknown teams are skipped, like
    /// the matching is done during a scrape pass.
    pub fn upsert_all(players: &[ScrapedPlayer]) -> usize {
        let db = PlayerService::get_db();
        let existing = db.read_all();
        let mut next_id = existing.iter().map(|p| p.id).max().unwrap_or(0) + 1;

        let mut added = 0;
        for player in players {
            if !TeamService::exists(&player.team_name) {
                continue;
            }
            let stored = match existing.iter().find(|p| p.scraped_id == player.scraped_id) {
                Some(current) => StoredPlayer {
                    name: player.full_name.clone(),
                    team: player.team_name.clone(),
                    total_runs: player.total_runs,
                    total_wickets: player.total_wickets,
                    total_matches: player.total_matches,
                    ..current.clone()
                },
                None => {
                    let id = next_id;
                    next_id += 1;
                    added += 1;
                    StoredPlayer {
                        id,
                        scraped_id: player.scraped_id.clone(),
                        name: player.full_name.clone(),
                        role: player.role,
                        team: player.team_name.clone(),
                        batting_style: player.batting_style.clone(),
                        bowling_style: player.bowling_style.clone(),
                        total_runs: player.total_runs,
                        total_wickets: player.total_wickets,
                        total_matches: player.total_matches,
                    }
                }
            };
            _ = db.write(&stored.id, &stored);
        }
        added
    }

    pub fn seed_if_empty() {
        if !PlayerService::get_db().read_all().is_empty() {
            return;
        }
        // same scraped ids as the scrape catalog, a later pass updates
        // these instead of duplicating them
        let samples = [
            ("player_1000", "Virat Kohli", PlayerRole::Batsman, "India", "Right-hand bat", "N/A", 12898, 4, 265),
            ("player_1001", "Rohit Sharma", PlayerRole::Batsman, "India", "Right-hand bat", "N/A", 10123, 8, 248),
            ("player_1006", "Pat Cummins", PlayerRole::Bowler, "Australia", "Right-hand bat", "Right-arm fast", 742, 216, 77),
            ("player_1008", "Joe Root", PlayerRole::Batsman, "England", "Right-hand bat", "N/A", 9278, 28, 152),
        ];
        let players: Vec<ScrapedPlayer> = samples
            .iter()
            .map(|(sid, name, role, team, bat, bowl, runs, wickets, matches)| ScrapedPlayer {
                scraped_id: sid.to_string(),
                full_name: name.to_string(),
                role: *role,
                team_name: team.to_string(),
                batting_style: bat.to_string(),
                bowling_style: bowl.to_string(),
                total_runs: *runs,
                total_wickets: *wickets,
                total_matches: *matches,
            })
            .collect();
        PlayerService::upsert_all(&players);
    }

    fn get_db() -> Db<u32, StoredPlayer> {
        Db::new("v1_players")
    }
}
