use serde::Deserialize;
use tracing::{debug, instrument};

use super::{get_json, string_or_null};
use crate::error::Result;
use crate::http::HttpClient;
use crate::model::{RegisteredTeam, TeamNumber};

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    result: Vec<RawTeam>,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    #[serde(default, deserialize_with = "string_or_null")]
    number: String,
    #[serde(default, deserialize_with = "string_or_null")]
    country: String,
    #[serde(default)]
    team_name: Option<String>,
    #[serde(default)]
    program: Option<String>,
}

fn into_registry(response: TeamsResponse) -> Vec<RegisteredTeam> {
    response
        .result
        .into_iter()
        .filter_map(|raw| {
            Some(RegisteredTeam {
                number: TeamNumber::parse(&raw.number)?,
                country: raw.country,
                name: raw.team_name.filter(|name| !name.trim().is_empty()),
                program: raw.program,
            })
        })
        .collect()
}

/// Fetch the VexDB roster of `program` teams registered in `country`.
#[instrument(skip(http))]
pub(crate) async fn get_teams(
    http: &HttpClient,
    program: &str,
    country: &str,
) -> Result<Vec<RegisteredTeam>> {
    let url = format!("{}/get_teams", http.config().vexdb_url);
    let params = [
        ("program", program.to_string()),
        ("country", country.to_string()),
    ];
    let response: TeamsResponse = get_json(http, &url, &params).await?;
    let teams = into_registry(response);
    debug!(count = teams.len(), program, country, "parsed team registry");
    Ok(teams)
}
