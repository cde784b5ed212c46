use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub port: u16,

    pub cricbuzz_url: String,

    #[serde(default = "default_db_path")]
    pub db_path: String,

    #[serde(default = "default_scrape_interval")]
    pub scrape_interval_s: u64,

    #[serde(default = "default_stale_match_hours")]
    pub stale_match_hours: i64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_false")]
    pub scrape_on_startup: bool,
}

fn default_db_path() -> String {
    "./db".to_string()
}

fn default_scrape_interval() -> u64 {
    60 * 60 * 6
}

fn default_stale_match_hours() -> i64 {
    8
}

fn default_user_agent() -> String {
    "cricket-points-rs/0.1".to_string()
}

fn default_false() -> bool {
    false
}

pub fn get_config() -> Config {
    let path = std::env::var("CONFIG_PATH").ok()
        .unwrap_or_else(|| "./deployment/config.json".to_string());
    let data = fs::read_to_string(path.clone())
        .expect("Unable to read file");
    let mut result: Config = serde_json::from_str(&data)
        .unwrap_or_else(|_| panic!("{}", &format!("Could not parse JSON at {path}!")));
    if let Ok(db_path) = std::env::var("DB_PATH") {
        result.db_path = db_path;
        println!("[CONFIG] DB_PATH {}", result.db_path);
    }
    println!("[CONFIG] {:?}", result);
    result
}
