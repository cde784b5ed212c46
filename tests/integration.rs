use cricket_points_rs::api_client::{ApiClient, ClientError};
use cricket_points_rs::calc_form::{BannerKind, CalcForm};
use cricket_points_rs::models::{MatchStatus, PlayerRole};
use cricket_points_rs::models_api::player::ApiPlayer;
use cricket_points_rs::models_api::points::CalculationRequest;
use cricket_points_rs::models_api::teams::ApiTeam;
use reqwest::{Method, StatusCode};
use tempdir::TempDir;

use crate::common::cricbuzz_server::CricbuzzServer;
use crate::common::cricket_server::CricketServer;

mod common;

#[tokio::test]
async fn test_scrape_flow() -> Result<(), Box<dyn std::error::Error>> {
    // Given - a scrape source and a fresh server
    let temp_dir = TempDir::new("integration_test").expect("dir to be created");
    let path = temp_dir.path().to_str().unwrap();

    let mut cricbuzz = CricbuzzServer::new(8101);
    cricbuzz.start().await;

    let mut server = CricketServer::new(8102);
    server.start(path, &cricbuzz.get_url());
    server.wait_until_ready().await;
    let client = server.client();

    // When - triggering a scrape
    let rsp = client.trigger_scrape().await?;

    // Then - both mock cards end up stored, next to the seeded match
    assert!(rsp.is_success());
    assert_eq!(rsp.matches_added, 2);
    assert!(rsp.total_matches >= 3);

    let matches = server
        .retry_until_matches(predicates::function::function(|m: &Vec<_>| m.len() >= 3), 100)
        .await;
    let live = matches
        .iter()
        .find(|m| m.team1 == "England" && m.team2 == "Pakistan")
        .expect("live match should be stored");
    assert_eq!(live.status, MatchStatus::Live);
    assert_eq!(live.team1_score.as_deref(), Some("182/6"));

    let completed = matches
        .iter()
        .find(|m| m.team1 == "India" && m.status == MatchStatus::Completed)
        .expect("completed match should be stored");
    assert_eq!(completed.result.as_deref(), Some("India won by 37 runs"));

    // Then - the player catalog made it in as well
    let players = client.fetch_players().await?;
    assert!(players.len() >= 18);
    assert!(players.iter().any(|p| p.name == "Jasprit Bumrah" && p.role == PlayerRole::Bowler));

    // Then - the team catalog is served, by list and by id
    let teams = client.fetch_teams().await?;
    assert_eq!(teams.len(), 14);
    let india = teams.iter().find(|t| t.name == "India").expect("team should be stored");
    assert_eq!(india.short_name, "IND");
    let by_id: ApiTeam = client.request(Method::GET, &format!("/api/teams/{}", india.id), None).await?;
    assert_eq!(by_id.name, "India");

    // Then - the health endpoint knows about the pass
    let health = client.fetch_health().await?;
    assert!(health.last_update.is_some());
    assert!(!health.scraping);

    // When - scraping again
    let rsp = client.trigger_scrape().await?;
    // Then - nothing new is added
    assert!(rsp.is_success());
    assert_eq!(rsp.matches_added, 0);
    Ok(())
}

#[tokio::test]
async fn test_calculate_via_form() -> Result<(), Box<dyn std::error::Error>> {
    // Given - a server with only the seed data
    let temp_dir = TempDir::new("integration_test").expect("dir to be created");
    let path = temp_dir.path().to_str().unwrap();

    let mut server = CricketServer::new(8103);
    server.start(path, "http://localhost:1");
    server.wait_until_ready().await;

    let mut form = CalcForm::new(server.client());
    form.attach_history();
    form.load_matches().await;
    form.load_players().await;
    assert!(!form.matches.options().is_empty());
    assert_eq!(form.players.options().len(), 4);

    // When - picking a bowler
    let cummins = form
        .players
        .options()
        .iter()
        .find(|o| o.label.contains("Pat Cummins"))
        .expect("seeded bowler")
        .value
        .clone();
    form.select_player(&cummins);

    // Then - only the bowling section is shown
    assert!(form.bowler_fields_visible());
    assert!(!form.batsman_fields_visible());

    // When - filling the spell and submitting
    let match_value = form.matches.options()[0].value.clone();
    form.matches.select(&match_value);
    form.bowling.wickets = Some(3);
    form.bowling.runs_conceded = Some(20);
    form.bowling.overs_bowled = Some(4.0);
    form.bowling.maidens = Some(1);

    let rsp = form.calculate().await.expect("calculation should succeed");

    // Then - 60 wickets + 10 haul + 10 economy + 10 maiden
    assert_eq!(rsp.points, 90.0);
    assert_eq!(rsp.player, "Pat Cummins");
    assert!(form.has_banner(BannerKind::Success));
    assert!(!form.has_banner(BannerKind::Error));

    // Then - the attached history was refreshed exactly once
    assert_eq!(form.history_refreshes(), 1);
    let rows = form.history_rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].player_name, "Pat Cummins");
    assert_eq!(rows[0].match_info, "India vs Australia - ODI");
    assert_eq!(rows[0].points, 90.0);

    // When - reloading the dropdowns
    form.load_players().await;
    form.load_matches().await;
    // Then - the selections survive
    assert_eq!(form.players.selected_value(), Some(cummins.as_str()));
    assert_eq!(form.matches.selected_value(), Some(match_value.as_str()));

    // When - calculating a second time
    form.calculate().await.expect("calculation should succeed");
    // Then - another history entry with a fresh id
    assert_eq!(form.history_refreshes(), 2);
    let rows = form.history_rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0].id, rows[1].id);
    Ok(())
}

#[tokio::test]
async fn test_error_paths() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new("integration_test").expect("dir to be created");
    let path = temp_dir.path().to_str().unwrap();

    let mut cricbuzz = CricbuzzServer::new(8104);
    cricbuzz.start().await;

    // the scrape source of this server is unreachable
    let mut server = CricketServer::new(8105);
    server.start(path, "http://localhost:1");
    server.wait_until_ready().await;
    let client = server.client();

    // When - triggering a scrape against the dead source
    let err = client.trigger_scrape().await.expect_err("scrape should fail");
    // Then - the failure surfaces as a 502 with the error envelope
    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert!(message.starts_with("Scrape failed"), "unexpected message {message}");
        }
        other => panic!("expected server error, got {other:?}"),
    }
    // Then - nothing beyond the seed data was stored
    assert_eq!(client.fetch_matches().await?.len(), 1);

    // When - asking for resources by id
    let player: ApiPlayer = client.request(Method::GET, "/api/players/1", None).await?;
    assert_eq!(player.name, "Virat Kohli");
    let err = client
        .request::<ApiTeam>(Method::GET, "/api/teams/42", None)
        .await
        .expect_err("unknown team should fail");
    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(message, "No team with id 42");
        }
        other => panic!("expected server error, got {other:?}"),
    }

    // When - calculating for a player that does not exist
    let err = client
        .calculate(&CalculationRequest::new(9999, 1))
        .await
        .expect_err("unknown player should fail");
    // Then - the envelope message comes through as-is
    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(message, "No player with id 9999");
        }
        other => panic!("expected server error, got {other:?}"),
    }

    // When - a form submits without any selection
    let mut form = CalcForm::new(server.client());
    form.attach_history();
    assert!(form.calculate().await.is_none());
    // Then - an error banner and no history refresh
    assert!(form.has_banner(BannerKind::Error));
    assert!(!form.has_banner(BannerKind::Success));
    assert_eq!(form.history_refreshes(), 0);

    // When - the api base url points at something that serves HTML
    let misconfigured = ApiClient::new(&cricbuzz.get_url());
    let err = misconfigured
        .trigger_scrape()
        .await
        .expect_err("html body should fail");
    // Then - the content type is rejected before any parsing
    match err {
        ClientError::NotJson { content_type } => assert!(content_type.contains("text/html")),
        other => panic!("expected non-json error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_scrape_single_flight() -> Result<(), Box<dyn std::error::Error>> {
    // Given - a scrape source slow enough to keep the first pass running
    let temp_dir = TempDir::new("integration_test").expect("dir to be created");
    let path = temp_dir.path().to_str().unwrap();

    let mut cricbuzz = CricbuzzServer::slow(8106, std::time::Duration::from_secs(3));
    cricbuzz.start().await;

    let mut server = CricketServer::new(8107);
    server.start(path, &cricbuzz.get_url());
    server.wait_until_ready().await;

    // When - two triggers overlap
    let client1 = server.client();
    let client2 = server.client();
    let (r1, r2) = tokio::join!(client1.trigger_scrape(), client2.trigger_scrape());

    // Then - one pass runs, the other is turned away with 409
    let (ok, err) = match (r1, r2) {
        (Ok(ok), Err(err)) => (ok, err),
        (Err(err), Ok(ok)) => (ok, err),
        other => panic!("expected one success and one rejection, got {other:?}"),
    };
    assert!(ok.is_success());
    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, StatusCode::CONFLICT);
            assert_eq!(message, "A scrape is already running");
        }
        other => panic!("expected server error, got {other:?}"),
    }
    Ok(())
}
