pub mod matches;
pub mod player;
pub mod points;
pub mod scrape;
pub mod status;
pub mod teams;
