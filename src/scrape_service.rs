use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::log;

use crate::match_service::MatchService;
use crate::player_service::PlayerService;
use crate::scrape_client::ScrapeClient;
use crate::team_service::TeamService;
use crate::CONFIG;

#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub matches_added: usize,
    pub total_matches: usize,
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("A scrape is already running")]
    InFlight,
    #[error("Scrape failed: {0}")]
    Failed(#[from] anyhow::Error),
}

/// Single-flight scrape orchestration. Everyone can trigger a scrape,
/// only one runs at a time.
pub struct ScrapeService {
    scraping: bool,
    last_update: Option<DateTime<Utc>>,
}

pub type SafeScrapeService = Arc<RwLock<ScrapeService>>;

impl ScrapeService {
    pub fn new() -> SafeScrapeService {
        Arc::new(RwLock::new(ScrapeService { scraping: false, last_update: None }))
    }

    pub fn is_scraping(&self) -> bool {
        self.scraping
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub async fn run(service: &SafeScrapeService) -> Result<ScrapeOutcome, ScrapeError> {
        {
            let mut state = service.write().await;
            if state.scraping {
                return Err(ScrapeError::InFlight);
            }
            state.scraping = true;
        }

        let result = ScrapeService::scrape_pass().await;

        let mut state = service.write().await;
        state.scraping = false;
        if result.is_ok() {
            state.last_update = Some(Utc::now());
        }
        result
    }

    async fn scrape_pass() -> Result<ScrapeOutcome, ScrapeError> {
        let before = Instant::now();
        let client = ScrapeClient::new()?;
        let harvest = client.scrape_all().await?;

        // teams first, matches and players of unknown teams are dropped
        let teams_added = TeamService::upsert_all(&harvest.teams);
        let players_added = PlayerService::upsert_all(&harvest.players);
        let matches_added = MatchService::upsert_all(&harvest.matches);

        MatchService::complete_stale(Duration::hours(CONFIG.stale_match_hours));

        log::info!(
            "[SCRAPE] Pass done in {:.2?}: +{} teams, +{} players, +{} matches",
            before.elapsed(), teams_added, players_added, matches_added
        );

        Ok(ScrapeOutcome { matches_added, total_matches: MatchService::count() })
    }

    pub fn sweep_stale() -> usize {
        MatchService::complete_stale(Duration::hours(CONFIG.stale_match_hours))
    }
}
