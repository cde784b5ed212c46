use futures::future::join_all;
use tracing::log;

use cricket_points_rs::api::Api;
use cricket_points_rs::match_service::MatchService;
use cricket_points_rs::player_service::PlayerService;
use cricket_points_rs::points_service::PointsService;
use cricket_points_rs::scrape_service::{SafeScrapeService, ScrapeService};
use cricket_points_rs::team_service::TeamService;
use cricket_points_rs::{LogResult, CONFIG};

#[tokio::main]
async fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        // Set the RUST_LOG, if it hasn't been explicitly defined
        std::env::set_var("RUST_LOG", "debug,hyper=debug")
    }

    // Configure a custom event formatter
    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_target(false)
        .with_ansi(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .compact();
    tracing_subscriber::fmt()
        .event_format(format)
        .with_max_level(tracing::Level::INFO)
        .init();

    TeamService::seed_if_empty();
    PlayerService::seed_if_empty();
    MatchService::seed_if_empty();

    let scrape_service = ScrapeService::new();
    let points_service = PointsService::new();

    if CONFIG.scrape_on_startup {
        ScrapeService::run(&scrape_service).await
            .ok_log("[MAIN] Startup scrape failed");
    }

    let h1 = {
        let scrape_service = scrape_service.clone();
        let points_service = points_service.clone();
        tokio::spawn(async { Api::serve(CONFIG.port, scrape_service, points_service).await })
    };
    let h2 = {
        let scrape_service = scrape_service.clone();
        tokio::spawn(async { handle_scrape_loop(scrape_service).await })
    };
    let h3 = tokio::spawn(async { handle_stale_sweep().await });

    join_all(vec![h1, h2, h3]).await;
}

async fn handle_scrape_loop(scrape_service: SafeScrapeService) {
    loop {
        tokio::time::sleep(std::time::Duration::from_secs(CONFIG.scrape_interval_s)).await;
        ScrapeService::run(&scrape_service).await
            .ok_log("[LOOP] Scheduled scrape failed");
    }
}

/// Live matches stop being live on their own when nobody updates them.
async fn handle_stale_sweep() {
    loop {
        tokio::time::sleep(std::time::Duration::from_secs(60 * 60)).await;
        let swept = ScrapeService::sweep_stale();
        if swept > 0 {
            log::info!("[LOOP] Completed {} stale live matches", swept);
        }
    }
}
