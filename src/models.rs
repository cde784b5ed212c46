use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerRole {
    #[serde(rename = "batsman")]
    Batsman,
    #[serde(rename = "bowler")]
    Bowler,
    #[serde(rename = "all-rounder")]
    AllRounder,
    #[serde(rename = "wicket-keeper")]
    WicketKeeper,
}

impl FromStr for PlayerRole {
    type Err = ParseStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "batsman" => Ok(PlayerRole::Batsman),
            "bowler" => Ok(PlayerRole::Bowler),
            "all-rounder" => Ok(PlayerRole::AllRounder),
            "wicket-keeper" => Ok(PlayerRole::WicketKeeper),
            _ => Err(ParseStringError),
        }
    }
}

impl Display for PlayerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlayerRole::Batsman => "batsman",
            PlayerRole::Bowler => "bowler",
            PlayerRole::AllRounder => "all-rounder",
            PlayerRole::WicketKeeper => "wicket-keeper",
        };
        write!(f, "{}", s)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFormat {
    T20,
    ODI,
    Test,
}

impl FromStr for MatchFormat {
    type Err = ParseStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "T20" => Ok(MatchFormat::T20),
            "ODI" => Ok(MatchFormat::ODI),
            "Test" => Ok(MatchFormat::Test),
            _ => Err(ParseStringError),
        }
    }
}

impl Display for MatchFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Completed,
    Cancelled,
}

impl Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Live => "live",
            MatchStatus::Completed => "completed",
            MatchStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DismissalType {
    #[default]
    NotOut,
    Bowled,
    Lbw,
    Caught,
    RunOut,
    Stumped,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseStringError;

/// Form controls post their values as strings, the API also accepts
/// plain numbers. Unparsable input falls back to zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StringOrNum {
    String(String),
    Number(f32),
}

impl StringOrNum {
    pub fn to_num(&self) -> u32 {
        match self {
            StringOrNum::String(str) => str.parse::<u32>().unwrap_or(0),
            StringOrNum::Number(n) => {
                if *n > 0.0 { *n as u32 } else { 0 }
            }
        }
    }

    pub fn to_f32(&self) -> f32 {
        match self {
            StringOrNum::String(str) => str.parse::<f32>().unwrap_or(0.0),
            StringOrNum::Number(n) => *n,
        }
    }
}

impl Default for StringOrNum {
    fn default() -> Self {
        StringOrNum::Number(0.0)
    }
}

impl From<u32> for StringOrNum {
    fn from(value: u32) -> Self {
        StringOrNum::Number(value as f32)
    }
}

impl From<f32> for StringOrNum {
    fn from(value: f32) -> Self {
        StringOrNum::Number(value)
    }
}
