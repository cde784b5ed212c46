use std::time::{Duration, Instant};

use tracing::log;

use crate::api_client::ApiClient;
use crate::models::{DismissalType, PlayerRole};
use crate::models_api::points::{CalculationRequest, CalculationRsp, PointsRecord};

pub const BANNER_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Success,
    Error,
}

/// Transient notification. Self-removes via `CalcForm::tick`, there is
/// no way to cancel one early.
#[derive(Debug, Clone)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    expires_at: Instant,
}

impl Banner {
    fn new(kind: BannerKind, message: String) -> Banner {
        Banner { kind, message, expires_at: Instant::now() + BANNER_TTL }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub role: Option<PlayerRole>,
}

/// A dropdown: options plus the currently selected value.
#[derive(Debug, Clone, Default)]
pub struct SelectState {
    options: Vec<SelectOption>,
    selected: Option<String>,
}

impl SelectState {
    /// Replace the options, keeping the current selection when it still
    /// exists among the new options.
    pub fn repopulate(&mut self, options: Vec<SelectOption>) {
        let selected = self
            .selected
            .take()
            .filter(|v| options.iter().any(|o| &o.value == v));
        self.options = options;
        self.selected = selected;
    }

    pub fn select(&mut self, value: &str) -> Option<&SelectOption> {
        match self.options.iter().position(|o| o.value == value) {
            Some(idx) => {
                self.selected = Some(value.to_string());
                self.options.get(idx)
            }
            None => {
                self.selected = None;
                None
            }
        }
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.selected
            .as_ref()
            .and_then(|v| self.options.iter().find(|o| &o.value == v))
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }
}

#[derive(Debug, Clone, Default)]
pub struct BattingInputs {
    pub runs: Option<u32>,
    pub balls_faced: Option<u32>,
    pub fours: Option<u32>,
    pub sixes: Option<u32>,
    pub dismissal: Option<DismissalType>,
}

#[derive(Debug, Clone, Default)]
pub struct BowlingInputs {
    pub wickets: Option<u32>,
    pub runs_conceded: Option<u32>,
    pub overs_bowled: Option<f32>,
    pub maidens: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct HistoryRow {
    pub id: u32,
    pub player_name: String,
    pub match_info: String,
    pub points: f32,
    pub date: String,
}

impl From<PointsRecord> for HistoryRow {
    fn from(value: PointsRecord) -> Self {
        HistoryRow {
            id: value.id,
            player_name: value.player_name,
            match_info: value.match_info,
            points: value.points,
            date: value.calculation_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// View model behind the calculation page: two dropdowns, the
/// role-conditional input sections, the banner area and an optional
/// points-history table. Every failure ends up in a banner, nothing
/// propagates out of here.
pub struct CalcForm {
    client: ApiClient,
    pub matches: SelectState,
    pub players: SelectState,
    pub batting: BattingInputs,
    pub bowling: BowlingInputs,
    role: Option<PlayerRole>,
    banners: Vec<Banner>,
    history: Option<Vec<HistoryRow>>,
    history_refreshes: usize,
}

impl CalcForm {
    pub fn new(client: ApiClient) -> CalcForm {
        CalcForm {
            client,
            matches: SelectState::default(),
            players: SelectState::default(),
            batting: BattingInputs::default(),
            bowling: BowlingInputs::default(),
            role: None,
            banners: vec![],
            history: None,
            history_refreshes: 0,
        }
    }

    /// The page has a history table, calculations should refresh it.
    pub fn attach_history(&mut self) {
        self.history = Some(vec![]);
    }

    pub async fn load_matches(&mut self) {
        match self.client.fetch_matches().await {
            Ok(matches) => {
                let options = matches
                    .into_iter()
                    .map(|m| SelectOption {
                        value: m.id.to_string(),
                        label: format!("{} vs {} - {}", m.team1, m.team2, m.format),
                        role: None,
                    })
                    .collect();
                self.matches.repopulate(options);
            }
            Err(e) => {
                log::error!("[FORM] Failed to load matches: {e}");
                self.push_banner(BannerKind::Error, format!("Error: {e}"));
            }
        }
    }

    pub async fn load_players(&mut self) {
        match self.client.fetch_players().await {
            Ok(players) => {
                let options = players
                    .into_iter()
                    .map(|p| SelectOption {
                        value: p.id.to_string(),
                        label: format!("{} ({}, {})", p.name, p.role, p.team),
                        role: Some(p.role),
                    })
                    .collect();
                self.players.repopulate(options);
            }
            Err(e) => {
                log::error!("[FORM] Failed to load players: {e}");
                self.push_banner(BannerKind::Error, format!("Error: {e}"));
            }
        }
    }

    /// Change handler of the player dropdown: remembers the player's
    /// role, which decides the visible input section.
    pub fn select_player(&mut self, value: &str) {
        self.role = self.players.select(value).and_then(|o| o.role);
    }

    pub fn role(&self) -> Option<PlayerRole> {
        self.role
    }

    pub fn batsman_fields_visible(&self) -> bool {
        self.role == Some(PlayerRole::Batsman)
    }

    pub fn bowler_fields_visible(&self) -> bool {
        self.role == Some(PlayerRole::Bowler)
    }

    /// Post the current form. On success the returned score lands in a
    /// banner and an attached history table is refreshed exactly once.
    pub async fn calculate(&mut self) -> Option<CalculationRsp> {
        let req = self.build_request();
        match self.client.calculate(&req).await {
            Ok(rsp) => {
                self.push_banner(
                    BannerKind::Success,
                    format!("Points calculated: {} for {}", rsp.points, rsp.player),
                );
                if self.history.is_some() {
                    self.refresh_history().await;
                }
                Some(rsp)
            }
            Err(e) => {
                log::error!("[FORM] Calculation failed: {e}");
                self.push_banner(BannerKind::Error, format!("Error: {e}"));
                None
            }
        }
    }

    pub async fn refresh_history(&mut self) {
        self.history_refreshes += 1;
        match self.client.fetch_history().await {
            Ok(records) => {
                self.history = Some(records.into_iter().map(|r| r.into()).collect());
            }
            Err(e) => {
                log::error!("[FORM] Failed to refresh history: {e}");
                self.push_banner(BannerKind::Error, format!("Error: {e}"));
            }
        }
    }

    fn build_request(&self) -> CalculationRequest {
        // an empty selection posts id 0, the server answers with 404
        let player_id = self.players.selected_value().and_then(|v| v.parse().ok()).unwrap_or(0);
        let match_id = self.matches.selected_value().and_then(|v| v.parse().ok()).unwrap_or(0);

        let mut req = CalculationRequest::new(player_id, match_id);
        match self.role {
            Some(PlayerRole::Batsman) => {
                req.runs = self.batting.runs.unwrap_or(0).into();
                req.balls_faced = self.batting.balls_faced.unwrap_or(0).into();
                req.fours = self.batting.fours.unwrap_or(0).into();
                req.sixes = self.batting.sixes.unwrap_or(0).into();
                req.dismissal_type = self.batting.dismissal.unwrap_or_default();
            }
            Some(PlayerRole::Bowler) => {
                req.wickets = self.bowling.wickets.unwrap_or(0).into();
                req.runs_conceded = self.bowling.runs_conceded.unwrap_or(0).into();
                req.overs_bowled = self.bowling.overs_bowled.unwrap_or(4.0).into();
                req.maidens = self.bowling.maidens.unwrap_or(0).into();
            }
            _ => {}
        }
        req
    }

    pub fn history_rows(&self) -> Option<&[HistoryRow]> {
        self.history.as_deref()
    }

    pub fn history_refreshes(&self) -> usize {
        self.history_refreshes
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn has_banner(&self, kind: BannerKind) -> bool {
        self.banners.iter().any(|b| b.kind == kind)
    }

    /// Drop banners whose time is up.
    pub fn tick(&mut self, now: Instant) {
        self.banners.retain(|b| !b.is_expired(now));
    }

    fn push_banner(&mut self, kind: BannerKind, message: String) {
        self.banners.push(Banner::new(kind, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CalcForm {
        CalcForm::new(ApiClient::new("http://localhost:0"))
    }

    fn player_option(value: &str, role: PlayerRole) -> SelectOption {
        SelectOption { value: value.to_string(), label: value.to_string(), role: Some(role) }
    }

    #[test]
    fn repopulate_preserves_still_valid_selection() {
        let mut select = SelectState::default();
        select.repopulate(vec![player_option("1", PlayerRole::Batsman), player_option("2", PlayerRole::Bowler)]);
        select.select("2");

        select.repopulate(vec![player_option("2", PlayerRole::Bowler), player_option("3", PlayerRole::Batsman)]);
        assert_eq!(select.selected_value(), Some("2"));

        select.repopulate(vec![player_option("4", PlayerRole::Batsman)]);
        assert_eq!(select.selected_value(), None);
    }

    #[test]
    fn selecting_player_toggles_role_sections() {
        let mut form = form();
        form.players.repopulate(vec![
            player_option("1", PlayerRole::Batsman),
            player_option("2", PlayerRole::Bowler),
            player_option("3", PlayerRole::AllRounder),
        ]);

        form.select_player("2");
        assert!(form.bowler_fields_visible());
        assert!(!form.batsman_fields_visible());

        form.select_player("1");
        assert!(form.batsman_fields_visible());
        assert!(!form.bowler_fields_visible());

        form.select_player("3");
        assert!(!form.batsman_fields_visible());
        assert!(!form.bowler_fields_visible());

        form.select_player("no-such-option");
        assert_eq!(form.role(), None);
    }

    #[test]
    fn request_only_carries_fields_of_the_active_role() {
        let mut form = form();
        form.players.repopulate(vec![player_option("7", PlayerRole::Bowler)]);
        form.matches.repopulate(vec![SelectOption { value: "3".to_string(), label: "m".to_string(), role: None }]);
        form.select_player("7");
        form.matches.select("3");
        form.bowling.wickets = Some(3);
        form.bowling.maidens = Some(1);
        form.batting.fours = Some(9); // hidden section, must not be sent

        let req = form.build_request();
        assert_eq!(req.player_id, 7);
        assert_eq!(req.match_id, 3);
        assert_eq!(req.wickets.to_num(), 3);
        assert_eq!(req.maidens.to_num(), 1);
        assert_eq!(req.overs_bowled.to_f32(), 4.0);
        assert_eq!(req.fours.to_num(), 0);
    }

    #[test]
    fn missing_selection_posts_id_zero() {
        let form = form();
        let req = form.build_request();
        assert_eq!(req.player_id, 0);
        assert_eq!(req.match_id, 0);
    }

    #[test]
    fn banners_expire_after_ttl() {
        let mut form = form();
        form.push_banner(BannerKind::Info, "hello".to_string());
        assert_eq!(form.banners().len(), 1);

        form.tick(Instant::now());
        assert_eq!(form.banners().len(), 1);

        form.tick(Instant::now() + BANNER_TTL + Duration::from_millis(10));
        assert!(form.banners().is_empty());
    }
}
