use std::fmt::Display;

use lazy_static::lazy_static;
use tracing::log;

use crate::config_handler::Config;

pub mod api;
pub mod api_client;
pub mod calc_form;
pub mod config_handler;
pub mod db;
pub mod match_service;
pub mod models;
pub mod models_api;
pub mod models_external;
pub mod player_service;
pub mod points_service;
pub mod scrape_client;
pub mod scrape_service;
pub mod team_service;

lazy_static! {
    pub static ref CONFIG: Config = config_handler::get_config();
}

pub trait LogResult<T, E: Display> {
    fn ok_log(self, msg: &str) -> Option<T>;
}

impl<T, E: Display> LogResult<T, E> for Result<T, E> {
    fn ok_log(self, msg: &str) -> Option<T> {
        match self {
            Ok(o) => Some(o),
            Err(e) => {
                log::error!("{}: {}", msg, e);
                None
            }
        }
    }
}
