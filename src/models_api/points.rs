use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DismissalType, StringOrNum};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PointsRecord {
    pub id: u32,
    pub player_name: String,
    pub match_info: String,
    pub points: f32,
    pub calculation_date: DateTime<Utc>,
}

/// Body of `POST /api/calculate`. Everything besides the two ids comes
/// from role-conditional form fields and defaults when absent.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CalculationRequest {
    pub player_id: u32,
    pub match_id: u32,

    #[serde(default)]
    pub runs: StringOrNum,
    #[serde(default)]
    pub balls_faced: StringOrNum,
    #[serde(default)]
    pub fours: StringOrNum,
    #[serde(default)]
    pub sixes: StringOrNum,
    #[serde(default)]
    pub dismissal_type: DismissalType,

    #[serde(default)]
    pub wickets: StringOrNum,
    #[serde(default)]
    pub runs_conceded: StringOrNum,
    #[serde(default = "default_overs")]
    pub overs_bowled: StringOrNum,
    #[serde(default)]
    pub maidens: StringOrNum,

    #[serde(default)]
    pub catches: StringOrNum,
    #[serde(default)]
    pub stumpings: StringOrNum,
    #[serde(default)]
    pub run_outs: StringOrNum,
}

fn default_overs() -> StringOrNum {
    StringOrNum::Number(4.0)
}

impl CalculationRequest {
    pub fn new(player_id: u32, match_id: u32) -> CalculationRequest {
        CalculationRequest {
            player_id,
            match_id,
            runs: StringOrNum::default(),
            balls_faced: StringOrNum::default(),
            fours: StringOrNum::default(),
            sixes: StringOrNum::default(),
            dismissal_type: DismissalType::default(),
            wickets: StringOrNum::default(),
            runs_conceded: StringOrNum::default(),
            overs_bowled: default_overs(),
            maidens: StringOrNum::default(),
            catches: StringOrNum::default(),
            stumpings: StringOrNum::default(),
            run_outs: StringOrNum::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CalculationRsp {
    pub points: f32,
    pub player: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorRsp {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DismissalType;

    #[test]
    fn request_defaults_missing_fields() {
        let req: CalculationRequest =
            serde_json::from_str(r#"{"player_id": 1, "match_id": 2}"#).unwrap();
        assert_eq!(req.fours.to_num(), 0);
        assert_eq!(req.overs_bowled.to_f32(), 4.0);
        assert_eq!(req.dismissal_type, DismissalType::NotOut);
    }

    #[test]
    fn request_accepts_form_strings() {
        let req: CalculationRequest = serde_json::from_str(
            r#"{"player_id": 1, "match_id": 2, "fours": "6", "overs_bowled": "3.5"}"#,
        )
        .unwrap();
        assert_eq!(req.fours.to_num(), 6);
        assert_eq!(req.overs_bowled.to_f32(), 3.5);
    }
}
