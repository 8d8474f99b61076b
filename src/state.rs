use std::collections::VecDeque;

use crate::fetch::FetchErrorKind;
use crate::stats::{self, MatchStats};

const LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSummary {
    pub id: String,
    pub name: String,
    pub logo_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Won,
    Lost,
    Drawn,
}

impl MatchStatus {
    /// Provider statuses other than "Won" and "Lost" (e.g. "Tied") all count
    /// as drawn. Stated policy, not a fallback.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Won" => MatchStatus::Won,
            "Lost" => MatchStatus::Lost,
            _ => MatchStatus::Drawn,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchStatus::Won => "Won",
            MatchStatus::Lost => "Lost",
            MatchStatus::Drawn => "Drawn",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub id: String,
    pub date: String,
    pub venue: String,
    pub competing_team: String,
    pub competing_team_logo: String,
    pub first_innings: String,
    pub second_innings: String,
    pub umpires: String,
    pub man_of_the_match: String,
    pub result: String,
    pub match_status: MatchStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDetail {
    pub banner_url: String,
    pub latest_match: MatchRecord,
    pub recent_matches: Vec<MatchRecord>,
}

/// Ready model for the team matches screen. `stats` is derived from
/// `detail.recent_matches` at transition time and never mutated on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMatchesModel {
    pub detail: TeamDetail,
    pub stats: MatchStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    TeamList,
    TeamMatches { team_id: String },
}

/// Lifecycle of one screen's data. A view only leaves `Loading` through a
/// retrieval result, and only re-enters `Loading` through a `begin_*` call on
/// `AppState`; there is no direct path between `Ready` and `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<T> {
    Loading,
    Ready(T),
    Error(FetchErrorKind),
}

impl<T> View<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, View::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            View::Ready(model) => Some(model),
            _ => None,
        }
    }
}

/// Identifies the retrieval a result belongs to. Tokens are handed out by
/// `AppState::begin_*` and checked in `apply_delta`, so a response that
/// arrives after the user has navigated elsewhere is dropped instead of
/// being applied to a screen that no longer owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

pub struct AppState {
    pub screen: Screen,
    pub team_list: View<Vec<TeamSummary>>,
    pub team_matches: View<TeamMatchesModel>,
    pub selected: usize,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    active_token: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::TeamList,
            team_list: View::Loading,
            team_matches: View::Loading,
            selected: 0,
            logs: VecDeque::with_capacity(LOG_CAPACITY),
            help_overlay: false,
            active_token: 0,
        }
    }

    /// Enter `Loading` for the team list screen. Bumping the token
    /// invalidates any retrieval still in flight.
    pub fn begin_team_list_load(&mut self) -> RequestToken {
        self.active_token += 1;
        self.screen = Screen::TeamList;
        self.team_list = View::Loading;
        RequestToken(self.active_token)
    }

    /// Enter `Loading` for a team's matches screen.
    pub fn begin_team_matches_load(&mut self, team_id: &str) -> RequestToken {
        self.active_token += 1;
        self.screen = Screen::TeamMatches {
            team_id: team_id.to_string(),
        };
        self.team_matches = View::Loading;
        RequestToken(self.active_token)
    }

    fn accepts(&self, token: RequestToken) -> bool {
        token.0 == self.active_token
    }

    pub fn selected_team(&self) -> Option<&TeamSummary> {
        self.team_list.ready()?.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if let Some(teams) = self.team_list.ready()
            && !teams.is_empty()
        {
            self.selected = (self.selected + 1).min(teams.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        if self.logs.len() == LOG_CAPACITY {
            self.logs.pop_front();
        }
        self.logs.push_back(line.into());
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    TeamListLoaded {
        token: RequestToken,
        teams: Vec<TeamSummary>,
    },
    TeamMatchesLoaded {
        token: RequestToken,
        detail: TeamDetail,
    },
    FetchFailed {
        token: RequestToken,
        kind: FetchErrorKind,
        message: String,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchTeamList {
        token: RequestToken,
    },
    FetchTeamMatches {
        token: RequestToken,
        team_id: String,
    },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::TeamListLoaded { token, teams } => {
            if !state.accepts(token) {
                state.push_log("[INFO] Dropped stale team list response");
                return;
            }
            if !state.team_list.is_loading() {
                return;
            }
            state.selected = state.selected.min(teams.len().saturating_sub(1));
            state.team_list = View::Ready(teams);
        }
        Delta::TeamMatchesLoaded { token, detail } => {
            if !state.accepts(token) {
                state.push_log("[INFO] Dropped stale team matches response");
                return;
            }
            if !state.team_matches.is_loading() {
                return;
            }
            let stats = stats::aggregate(&detail.recent_matches);
            state.team_matches = View::Ready(TeamMatchesModel { detail, stats });
        }
        Delta::FetchFailed {
            token,
            kind,
            message,
        } => {
            if !state.accepts(token) {
                state.push_log("[INFO] Dropped stale fetch failure");
                return;
            }
            state.push_log(format!("[WARN] Fetch failed: {message}"));
            // The token matches the active retrieval, so the failure belongs
            // to whichever screen is currently loading.
            match state.screen {
                Screen::TeamList => {
                    if state.team_list.is_loading() {
                        state.team_list = View::Error(kind);
                    }
                }
                Screen::TeamMatches { .. } => {
                    if state.team_matches.is_loading() {
                        state.team_matches = View::Error(kind);
                    }
                }
            }
        }
        Delta::Log(line) => state.push_log(line),
    }
}
