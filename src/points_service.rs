use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::log;

use crate::db::Db;
use crate::match_service::MatchService;
use crate::models::{DismissalType, PlayerRole};
use crate::models_api::points::{CalculationRequest, CalculationRsp, PointsRecord};
use crate::player_service::PlayerService;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("No player with id {0}")]
    UnknownPlayer(u32),
    #[error("No match with id {0}")]
    UnknownMatch(u32),
}

#[derive(Debug, Clone, Default)]
pub struct BattingInnings {
    pub runs: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    pub dismissal: DismissalType,
}

#[derive(Debug, Clone, Default)]
pub struct BowlingSpell {
    pub wickets: u32,
    pub runs_conceded: u32,
    pub overs_bowled: f32,
    pub maidens: u32,
}

#[derive(Debug, Clone, Default)]
pub struct FieldingEffort {
    pub catches: u32,
    pub stumpings: u32,
    pub run_outs: u32,
}

impl From<&CalculationRequest> for BattingInnings {
    fn from(req: &CalculationRequest) -> Self {
        BattingInnings {
            runs: req.runs.to_num(),
            balls_faced: req.balls_faced.to_num(),
            fours: req.fours.to_num(),
            sixes: req.sixes.to_num(),
            dismissal: req.dismissal_type,
        }
    }
}

impl From<&CalculationRequest> for BowlingSpell {
    fn from(req: &CalculationRequest) -> Self {
        BowlingSpell {
            wickets: req.wickets.to_num(),
            runs_conceded: req.runs_conceded.to_num(),
            overs_bowled: req.overs_bowled.to_f32(),
            maidens: req.maidens.to_num(),
        }
    }
}

impl From<&CalculationRequest> for FieldingEffort {
    fn from(req: &CalculationRequest) -> Self {
        FieldingEffort {
            catches: req.catches.to_num(),
            stumpings: req.stumpings.to_num(),
            run_outs: req.run_outs.to_num(),
        }
    }
}

pub fn batting_points(innings: &BattingInnings) -> f32 {
    let mut points = innings.runs as f32;

    let strike_rate = match innings.balls_faced {
        0 => 0.0,
        balls => (innings.runs as f32 / balls as f32) * 100.0,
    };
    if strike_rate > 140.0 {
        points += 20.0;
    } else if strike_rate > 120.0 {
        points += 10.0;
    } else if strike_rate < 60.0 {
        points -= 10.0;
    }

    points += innings.fours as f32 * 0.5;
    points += innings.sixes as f32;

    if innings.runs >= 100 {
        points += 25.0;
    } else if innings.runs >= 50 {
        points += 10.0;
    }

    match innings.dismissal {
        DismissalType::Bowled | DismissalType::Lbw => points -= 5.0,
        DismissalType::NotOut => points += 10.0,
        _ => {}
    }

    round2(points)
}

pub fn bowling_points(spell: &BowlingSpell) -> f32 {
    let mut points = spell.wickets as f32 * 20.0;

    if spell.wickets >= 5 {
        points += 25.0;
    } else if spell.wickets >= 3 {
        points += 10.0;
    }

    let economy = match spell.overs_bowled > 0.0 {
        true => spell.runs_conceded as f32 / spell.overs_bowled,
        false => f32::INFINITY,
    };
    if economy < 5.0 {
        points += 20.0;
    } else if economy < 7.0 {
        points += 10.0;
    } else if economy > 10.0 {
        points -= 10.0;
    }

    points += spell.maidens as f32 * 10.0;

    round2(points)
}

pub fn fielding_points(effort: &FieldingEffort) -> f32 {
    let points = effort.catches as f32 * 10.0
        + effort.stumpings as f32 * 12.0
        + effort.run_outs as f32 * 15.0;
    round2(points)
}

fn round2(points: f32) -> f32 {
    (points * 100.0).round() / 100.0
}

/// The history lives in a single document, so appends are a
/// read-modify-write and have to be serialized behind the lock.
pub struct PointsService;

pub type SafePointsService = Arc<RwLock<PointsService>>;

impl PointsService {
    pub fn new() -> SafePointsService {
        Arc::new(RwLock::new(PointsService))
    }

    /// Look up the player and match, score the submitted figures by role
    /// and append the result to the calculation history.
    pub fn calculate(&mut self, req: &CalculationRequest) -> Result<CalculationRsp, CalcError> {
        let player = PlayerService::read(req.player_id).ok_or(CalcError::UnknownPlayer(req.player_id))?;
        let m = MatchService::read(req.match_id).ok_or(CalcError::UnknownMatch(req.match_id))?;

        let points = match player.role {
            PlayerRole::Batsman => batting_points(&req.into()),
            PlayerRole::Bowler => bowling_points(&req.into()),
            PlayerRole::AllRounder => round2(batting_points(&req.into()) + bowling_points(&req.into())),
            PlayerRole::WicketKeeper => round2(batting_points(&req.into()) + fielding_points(&req.into())),
        };

        log::info!("[POINTS] {} scores {} in {}", player.name, points, m.display_info());
        self.append_history(&player.name, &m.display_info(), points);

        Ok(CalculationRsp { points, player: player.name })
    }

    /// Most recent first.
    pub fn read_history() -> Vec<PointsRecord> {
        let mut history = PointsService::get_db().read(&"all".to_string()).unwrap_or_default();
        history.sort_by(|a, b| b.calculation_date.cmp(&a.calculation_date));
        history
    }

    fn append_history(&mut self, player_name: &str, match_info: &str, points: f32) {
        let db = PointsService::get_db();
        let mut history = db.read(&"all".to_string()).unwrap_or_default();
        let id = history.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        history.push(PointsRecord {
            id,
            player_name: player_name.to_string(),
            match_info: match_info.to_string(),
            points,
            calculation_date: Utc::now(),
        });
        _ = db.write(&"all".to_string(), &history);
    }

    fn get_db() -> Db<String, Vec<PointsRecord>> {
        Db::new("v1_points_history")
    }
}
