use std::env;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::http_client::http_client;
use crate::state::{MatchRecord, MatchStatus, TeamDetail, TeamSummary};

const DEFAULT_TEAM_LIST_URL: &str = "https://apis.ccbp.in/ipl";
const DEFAULT_TEAM_DETAIL_URL: &str = "https://apis.ccbp.in/ipl/";

/// Retrieval failures, split by where the pipeline gave up. The kind travels
/// unmodified up to the view state machine; nothing below it substitutes
/// placeholder data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid json: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("schema mismatch: {0}")]
    Schema(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Network,
    Parse,
    Schema,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Network(_) => FetchErrorKind::Network,
            FetchError::Parse(_) => FetchErrorKind::Parse,
            FetchError::Schema(_) => FetchErrorKind::Schema,
        }
    }
}

impl FetchErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            FetchErrorKind::Network => "network failure",
            FetchErrorKind::Parse => "malformed response",
            FetchErrorKind::Schema => "unexpected response shape",
        }
    }
}

/// Injected endpoint configuration. The detail URL is a base; the team id is
/// appended per request.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub team_list_url: String,
    pub team_detail_url: String,
}

impl Endpoints {
    pub fn from_env() -> Self {
        let team_list_url = env::var("TEAM_LIST_URL")
            .ok()
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_TEAM_LIST_URL.to_string());
        let team_detail_url = env::var("TEAM_DETAIL_URL")
            .ok()
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_TEAM_DETAIL_URL.to_string());
        Self {
            team_list_url,
            team_detail_url,
        }
    }

    pub fn team_detail_url_for(&self, team_id: &str) -> String {
        format!("{}{}", self.team_detail_url, team_id)
    }
}

pub fn fetch_team_list(endpoints: &Endpoints) -> Result<Vec<TeamSummary>, FetchError> {
    let body = fetch_body(&endpoints.team_list_url)?;
    parse_team_list_json(&body)
}

pub fn fetch_team_detail(endpoints: &Endpoints, team_id: &str) -> Result<TeamDetail, FetchError> {
    let body = fetch_body(&endpoints.team_detail_url_for(team_id))?;
    parse_team_detail_json(&body)
}

fn fetch_body(url: &str) -> Result<String, FetchError> {
    let client = http_client().map_err(|err| FetchError::Network(err.to_string()))?;
    let resp = client
        .get(url)
        .send()
        .map_err(|err| FetchError::Network(err.to_string()))?;
    let status = resp.status();
    let body = resp
        .text()
        .map_err(|err| FetchError::Network(err.to_string()))?;
    if !status.is_success() {
        return Err(FetchError::Network(format!("http {status}")));
    }
    Ok(body)
}

#[derive(Debug, Deserialize)]
struct TeamListWire {
    teams: Vec<TeamSummaryWire>,
}

#[derive(Debug, Deserialize)]
struct TeamSummaryWire {
    id: String,
    name: String,
    #[serde(rename = "team_image_url")]
    logo_url: String,
}

#[derive(Debug, Deserialize)]
struct TeamDetailWire {
    #[serde(rename = "team_banner_url")]
    banner_url: String,
    #[serde(rename = "latest_match_details")]
    latest_match: MatchRecordWire,
    recent_matches: Vec<MatchRecordWire>,
}

// Required fields only. A missing key is a schema break and must surface as
// such, not default to an empty string.
#[derive(Debug, Deserialize)]
struct MatchRecordWire {
    id: String,
    date: String,
    venue: String,
    competing_team: String,
    competing_team_logo: String,
    first_innings: String,
    second_innings: String,
    umpires: String,
    man_of_the_match: String,
    result: String,
    match_status: String,
}

/// Pure normalization: external snake_case payload to the internal team list,
/// source order preserved.
pub fn parse_team_list_json(raw: &str) -> Result<Vec<TeamSummary>, FetchError> {
    let wire: TeamListWire = decode(raw)?;
    Ok(wire
        .teams
        .into_iter()
        .map(|team| TeamSummary {
            id: team.id,
            name: team.name,
            logo_url: team.logo_url,
        })
        .collect())
}

/// Pure normalization for the team detail payload.
pub fn parse_team_detail_json(raw: &str) -> Result<TeamDetail, FetchError> {
    let wire: TeamDetailWire = decode(raw)?;
    Ok(TeamDetail {
        banner_url: wire.banner_url,
        latest_match: build_match_record(wire.latest_match),
        recent_matches: wire
            .recent_matches
            .into_iter()
            .map(build_match_record)
            .collect(),
    })
}

// Two-stage decode keeps the failure kinds apart: a body that is not JSON at
// all is Parse, well-formed JSON that misses the contract is Schema.
fn decode<T: for<'de> Deserialize<'de>>(raw: &str) -> Result<T, FetchError> {
    let value: Value = serde_json::from_str(raw).map_err(FetchError::Parse)?;
    serde_json::from_value(value).map_err(FetchError::Schema)
}

fn build_match_record(wire: MatchRecordWire) -> MatchRecord {
    MatchRecord {
        match_status: MatchStatus::from_raw(&wire.match_status),
        id: wire.id,
        date: wire.date,
        venue: wire.venue,
        competing_team: wire.competing_team,
        competing_team_logo: wire.competing_team_logo,
        first_innings: wire.first_innings,
        second_innings: wire.second_innings,
        umpires: wire.umpires,
        man_of_the_match: wire.man_of_the_match,
        result: wire.result,
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
