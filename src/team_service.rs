use serde::{Deserialize, Serialize};

use crate::db::Db;
use crate::models_external::ScrapedTeam;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StoredTeam {
    pub id: u32,
    pub name: String,
    pub short_name: String,
    pub country: String,
    pub founded_year: Option<u16>,
}

pub struct TeamService;

impl TeamService {
    pub fn read_all() -> Vec<StoredTeam> {
        let mut teams = TeamService::get_db().read_all();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        teams
    }

    pub fn read(id: u32) -> Option<StoredTeam> {
        TeamService::get_db().read(&id)
    }

    pub fn exists(name: &str) -> bool {
        TeamService::get_db().read_all().iter().any(|t| t.name == name)
    }

    pub fn count() -> usize {
        TeamService::get_db().read_all().len()
    }

    /// Insert new teams by name, returns the number added.
    pub fn upsert_all(teams: &[ScrapedTeam]) -> usize {
        let db = TeamService::get_db();
        let existing = db.read_all();
        let mut next_id = existing.iter().map(|t| t.id).max().unwrap_or(0) + 1;

        let mut added = 0;
        for team in teams {
            if existing.iter().any(|t| t.name == team.name) {
                continue;
            }
            let stored = StoredTeam {
                id: next_id,
                name: team.name.clone(),
                short_name: team.short_name.clone(),
                country: team.country.clone(),
                founded_year: team.founded_year,
            };
            _ = db.write(&stored.id, &stored);
            next_id += 1;
            added += 1;
        }
        added
    }

    pub fn seed_if_empty() {
        if !TeamService::get_db().read_all().is_empty() {
            return;
        }
        let samples = [
            ("India", "IND"),
            ("Australia", "AUS"),
            ("England", "ENG"),
            ("Pakistan", "PAK"),
        ];
        let teams: Vec<ScrapedTeam> = samples
            .iter()
            .map(|(name, code)| ScrapedTeam {
                name: name.to_string(),
                short_name: code.to_string(),
                country: name.to_string(),
                founded_year: None,
            })
            .collect();
        TeamService::upsert_all(&teams);
    }

    fn get_db() -> Db<u32, StoredTeam> {
        Db::new("v1_teams")
    }
}
