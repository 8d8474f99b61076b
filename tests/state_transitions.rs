use ipl_terminal::fetch::FetchErrorKind;
use ipl_terminal::state::{
    apply_delta, AppState, Delta, MatchRecord, MatchStatus, Screen, TeamDetail, TeamSummary, View,
};

fn sample_teams() -> Vec<TeamSummary> {
    vec![
        TeamSummary {
            id: "RCB".to_string(),
            name: "Royal Challengers Bangalore".to_string(),
            logo_url: "https://x/rcb.png".to_string(),
        },
        TeamSummary {
            id: "KKR".to_string(),
            name: "Kolkata Knight Riders".to_string(),
            logo_url: "https://x/kkr.png".to_string(),
        },
    ]
}

fn record(id: &str, status: MatchStatus) -> MatchRecord {
    MatchRecord {
        id: id.to_string(),
        date: "2021-04-01".to_string(),
        venue: "At Eden Gardens, Kolkata".to_string(),
        competing_team: "Mumbai Indians".to_string(),
        competing_team_logo: "https://x/mi.png".to_string(),
        first_innings: "150/7 (20 ov)".to_string(),
        second_innings: "151/4 (19 ov)".to_string(),
        umpires: "S Ravi, CB Gaffaney".to_string(),
        man_of_the_match: "Someone".to_string(),
        result: "Won by 6 wickets".to_string(),
        match_status: status,
    }
}

fn sample_detail() -> TeamDetail {
    TeamDetail {
        banner_url: "https://x/banner.png".to_string(),
        latest_match: record("m1", MatchStatus::Won),
        recent_matches: vec![
            record("m2", MatchStatus::Won),
            record("m3", MatchStatus::Lost),
            record("m4", MatchStatus::Drawn),
        ],
    }
}

#[test]
fn loading_to_ready_on_success() {
    let mut state = AppState::new();
    let token = state.begin_team_list_load();
    assert!(state.team_list.is_loading());

    apply_delta(
        &mut state,
        Delta::TeamListLoaded {
            token,
            teams: sample_teams(),
        },
    );

    let teams = state.team_list.ready().expect("list should be ready");
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].id, "RCB");
}

#[test]
fn loading_to_error_on_failure_never_partial_ready() {
    let mut state = AppState::new();
    let token = state.begin_team_matches_load("KKR");

    apply_delta(
        &mut state,
        Delta::FetchFailed {
            token,
            kind: FetchErrorKind::Network,
            message: "network error: connection refused".to_string(),
        },
    );

    assert_eq!(state.team_matches, View::Error(FetchErrorKind::Network));
    assert!(state.team_matches.ready().is_none());
}

#[test]
fn ready_model_carries_recomputed_stats() {
    let mut state = AppState::new();
    let token = state.begin_team_matches_load("KKR");

    apply_delta(
        &mut state,
        Delta::TeamMatchesLoaded {
            token,
            detail: sample_detail(),
        },
    );

    let model = state.team_matches.ready().expect("detail should be ready");
    assert_eq!(model.stats.won, 1);
    assert_eq!(model.stats.lost, 1);
    assert_eq!(model.stats.drawn, 1);
    assert_eq!(model.stats.total(), model.detail.recent_matches.len());
}

#[test]
fn retry_goes_through_loading_before_ready() {
    let mut state = AppState::new();
    let token = state.begin_team_list_load();
    apply_delta(
        &mut state,
        Delta::FetchFailed {
            token,
            kind: FetchErrorKind::Parse,
            message: "invalid json".to_string(),
        },
    );
    assert_eq!(state.team_list, View::Error(FetchErrorKind::Parse));

    let retry_token = state.begin_team_list_load();
    assert!(state.team_list.is_loading());

    apply_delta(
        &mut state,
        Delta::TeamListLoaded {
            token: retry_token,
            teams: sample_teams(),
        },
    );
    assert!(state.team_list.ready().is_some());
}

#[test]
fn result_with_stale_token_is_discarded() {
    let mut state = AppState::new();
    let detail_token = state.begin_team_matches_load("KKR");

    // User navigates back before the detail response lands.
    state.begin_team_list_load();
    assert_eq!(state.screen, Screen::TeamList);

    apply_delta(
        &mut state,
        Delta::TeamMatchesLoaded {
            token: detail_token,
            detail: sample_detail(),
        },
    );

    // The defunct screen instance never sees the late result.
    assert!(state.team_matches.is_loading());
    assert!(state.team_list.is_loading());
}

#[test]
fn stale_failure_does_not_clobber_active_screen() {
    let mut state = AppState::new();
    let detail_token = state.begin_team_matches_load("KKR");

    let list_token = state.begin_team_list_load();
    apply_delta(
        &mut state,
        Delta::TeamListLoaded {
            token: list_token,
            teams: sample_teams(),
        },
    );

    apply_delta(
        &mut state,
        Delta::FetchFailed {
            token: detail_token,
            kind: FetchErrorKind::Network,
            message: "network error: timed out".to_string(),
        },
    );

    // List stays Ready; a stale failure never forces Ready -> Error.
    assert!(state.team_list.ready().is_some());
}

#[test]
fn error_never_becomes_ready_without_a_new_load() {
    let mut state = AppState::new();
    let token = state.begin_team_list_load();
    apply_delta(
        &mut state,
        Delta::FetchFailed {
            token,
            kind: FetchErrorKind::Schema,
            message: "schema mismatch: missing field".to_string(),
        },
    );
    assert_eq!(state.team_list, View::Error(FetchErrorKind::Schema));

    // A duplicate result for the same token finds the view no longer Loading.
    apply_delta(
        &mut state,
        Delta::TeamListLoaded {
            token,
            teams: sample_teams(),
        },
    );
    assert_eq!(state.team_list, View::Error(FetchErrorKind::Schema));
}

#[test]
fn selection_is_clamped_to_the_new_list() {
    let mut state = AppState::new();
    let token = state.begin_team_list_load();
    state.selected = 10;

    apply_delta(
        &mut state,
        Delta::TeamListLoaded {
            token,
            teams: sample_teams(),
        },
    );
    assert_eq!(state.selected, 1);

    state.select_next();
    assert_eq!(state.selected, 1);
    state.select_prev();
    assert_eq!(state.selected, 0);
}
