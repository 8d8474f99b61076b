use std::fs;
use std::path::PathBuf;

use ipl_terminal::fetch::{parse_team_detail_json, parse_team_list_json, FetchErrorKind};
use ipl_terminal::state::MatchStatus;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_team_list_fixture_preserving_order() {
    let raw = read_fixture("team_list.json");
    let teams = parse_team_list_json(&raw).expect("fixture should parse");
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].id, "RCB");
    assert_eq!(teams[0].name, "Royal Challengers Bangalore");
    assert_eq!(
        teams[0].logo_url,
        "https://assets.ccbp.in/frontend/react-js/rcb-logo-img.png"
    );
    assert_eq!(teams[1].id, "KKR");
    assert_eq!(teams[1].name, "Kolkata Knight Riders");
}

#[test]
fn parses_team_detail_fixture() {
    let raw = read_fixture("team_detail.json");
    let detail = parse_team_detail_json(&raw).expect("fixture should parse");
    assert_eq!(
        detail.banner_url,
        "https://assets.ccbp.in/frontend/react-js/kkr-banner-img.png"
    );
    assert_eq!(detail.latest_match.id, "m9001");
    assert_eq!(detail.latest_match.competing_team, "Mumbai Indians");
    assert_eq!(detail.latest_match.match_status, MatchStatus::Won);
    assert_eq!(detail.recent_matches.len(), 4);
    assert_eq!(detail.recent_matches[1].match_status, MatchStatus::Lost);
}

#[test]
fn tied_status_folds_into_drawn() {
    let raw = read_fixture("team_detail.json");
    let detail = parse_team_detail_json(&raw).expect("fixture should parse");
    let tied = detail
        .recent_matches
        .iter()
        .find(|m| m.id == "m9004")
        .expect("tied match should be present");
    assert_eq!(tied.match_status, MatchStatus::Drawn);
}

#[test]
fn malformed_body_is_a_parse_error() {
    let err = parse_team_list_json("{not json at all").expect_err("should fail");
    assert_eq!(err.kind(), FetchErrorKind::Parse);

    let err = parse_team_detail_json("").expect_err("should fail");
    assert_eq!(err.kind(), FetchErrorKind::Parse);
}

#[test]
fn missing_required_field_is_a_schema_error() {
    // Well-formed JSON, but the team entry lacks team_image_url.
    let raw = r#"{"teams": [{"id": "RCB", "name": "Royal Challengers Bangalore"}]}"#;
    let err = parse_team_list_json(raw).expect_err("should fail");
    assert_eq!(err.kind(), FetchErrorKind::Schema);
}

#[test]
fn detail_without_latest_match_is_a_schema_error() {
    let raw = r#"{"team_banner_url": "https://x/banner.png", "recent_matches": []}"#;
    let err = parse_team_detail_json(raw).expect_err("should fail");
    assert_eq!(err.kind(), FetchErrorKind::Schema);
}

#[test]
fn wrong_shape_is_a_schema_error_not_parse() {
    // teams is an object instead of an array.
    let raw = r#"{"teams": {"id": "RCB"}}"#;
    let err = parse_team_list_json(raw).expect_err("should fail");
    assert_eq!(err.kind(), FetchErrorKind::Schema);
}
