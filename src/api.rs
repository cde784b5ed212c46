use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use chrono::Utc;
use reqwest::StatusCode;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tracing::log;

use crate::match_service::MatchService;
use crate::models_api::matches::ApiMatch;
use crate::models_api::player::ApiPlayer;
use crate::models_api::points::{CalculationRequest, ErrorRsp};
use crate::models_api::scrape::ScrapeRsp;
use crate::models_api::status::{HealthRsp, StatusRsp};
use crate::models_api::teams::ApiTeam;
use crate::player_service::PlayerService;
use crate::points_service::{PointsService, SafePointsService};
use crate::scrape_service::{SafeScrapeService, ScrapeError, ScrapeService};
use crate::team_service::TeamService;

#[derive(Clone)]
pub struct ApiState {
    pub scrape_service: SafeScrapeService,
    pub points_service: SafePointsService,
}

pub struct Api;

impl Api {
    pub async fn serve(port: u16, scrape_service: SafeScrapeService, points_service: SafePointsService) {
        let state = ApiState { scrape_service, points_service };
        let app = Router::new()
            .route("/api/scrape/matches", axum::routing::get(Api::scrape_matches))
            .route("/api/teams", axum::routing::get(Api::get_teams))
            .route("/api/teams/:id", axum::routing::get(Api::get_team))
            .route("/api/matches", axum::routing::get(Api::get_matches))
            .route("/api/matches/:id", axum::routing::get(Api::get_match))
            .route("/api/players", axum::routing::get(Api::get_players))
            .route("/api/players/:id", axum::routing::get(Api::get_player))
            .route("/api/calculate", axum::routing::post(Api::calculate))
            .route("/api/points/history", axum::routing::get(Api::get_points_history))

            .route("/api/health", axum::routing::get(Api::health))
            .route("/api/status", axum::routing::get(Api::status))

            .route("/", axum::routing::get(Api::root))
            .with_state(state)
            .layer(ServiceBuilder::new()
                .layer(CompressionLayer::new())
            );
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        log::info!("[API] Listening on {}", addr);
        _ = axum::Server::bind(&addr)
            .serve(app.into_make_service())
            .await;
    }

    async fn root() -> &'static str {
        "Howzat"
    }

    async fn scrape_matches(State(state): State<ApiState>) -> impl IntoResponse {
        match ScrapeService::run(&state.scrape_service).await {
            Ok(outcome) => (StatusCode::OK, Json(ScrapeRsp {
                status: "success".to_string(),
                message: format!("Scrape complete, {} new matches", outcome.matches_added),
                matches_added: outcome.matches_added,
                total_matches: outcome.total_matches,
            })),
            Err(e) => {
                log::error!("[API] Scrape trigger failed: {e}");
                let status = match e {
                    ScrapeError::InFlight => StatusCode::CONFLICT,
                    ScrapeError::Failed(_) => StatusCode::BAD_GATEWAY,
                };
                (status, Json(ScrapeRsp {
                    status: "error".to_string(),
                    message: e.to_string(),
                    matches_added: 0,
                    total_matches: MatchService::count(),
                }))
            }
        }
    }

    async fn get_teams() -> Json<Vec<ApiTeam>> {
        Json(TeamService::read_all().into_iter().map(|t| t.into()).collect())
    }

    async fn get_team(Path(id): Path<u32>) -> Response {
        match TeamService::read(id) {
            Some(t) => Json(ApiTeam::from(t)).into_response(),
            None => Api::not_found("team", id),
        }
    }

    async fn get_matches() -> Json<Vec<ApiMatch>> {
        Json(MatchService::read_all().into_iter().map(|m| m.into()).collect())
    }

    async fn get_match(Path(id): Path<u32>) -> Response {
        match MatchService::read(id) {
            Some(m) => Json(ApiMatch::from(m)).into_response(),
            None => Api::not_found("match", id),
        }
    }

    async fn get_players() -> Json<Vec<ApiPlayer>> {
        Json(PlayerService::read_all().into_iter().map(|p| p.into()).collect())
    }

    async fn get_player(Path(id): Path<u32>) -> Response {
        match PlayerService::read(id) {
            Some(p) => Json(ApiPlayer::from(p)).into_response(),
            None => Api::not_found("player", id),
        }
    }

    fn not_found(resource: &str, id: u32) -> Response {
        (StatusCode::NOT_FOUND, Json(ErrorRsp { error: format!("No {resource} with id {id}") })).into_response()
    }

    async fn calculate(
        State(state): State<ApiState>,
        payload: Result<Json<CalculationRequest>, JsonRejection>,
    ) -> Response {
        let req = match payload {
            Ok(Json(req)) => req,
            Err(e) => {
                return (StatusCode::BAD_REQUEST, Json(ErrorRsp { error: e.to_string() })).into_response();
            }
        };
        match state.points_service.write().await.calculate(&req) {
            Ok(rsp) => Json(rsp).into_response(),
            Err(e) => (StatusCode::NOT_FOUND, Json(ErrorRsp { error: e.to_string() })).into_response(),
        }
    }

    async fn get_points_history() -> impl IntoResponse {
        Json(PointsService::read_history())
    }

    async fn health(State(state): State<ApiState>) -> Json<HealthRsp> {
        let scrape_service = state.scrape_service.read().await;
        Json(HealthRsp {
            status: "ok".to_string(),
            time: Utc::now(),
            last_update: scrape_service.last_update(),
            scraping: scrape_service.is_scraping(),
        })
    }

    async fn status(State(state): State<ApiState>) -> Json<StatusRsp> {
        let scrape_service = state.scrape_service.read().await;
        Json(StatusRsp {
            scraping: scrape_service.is_scraping(),
            last_update: scrape_service.last_update(),
            teams_count: TeamService::count(),
            players_count: PlayerService::count(),
            matches_count: MatchService::count(),
        })
    }
}
