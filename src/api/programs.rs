use serde::Deserialize;
use tracing::{debug, instrument};

use super::{get_json, lenient_number, string_or_null};
use crate::error::Result;
use crate::http::HttpClient;
use crate::model::{Program, Season};

#[derive(Debug, Deserialize)]
struct ProgramsResponse {
    #[serde(default)]
    data: Vec<RawProgram>,
}

#[derive(Debug, Deserialize)]
struct RawProgram {
    id: u32,
    #[serde(default, deserialize_with = "string_or_null")]
    name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    abbr: String,
    #[serde(default)]
    seasons: Vec<RawSeason>,
}

#[derive(Debug, Deserialize)]
struct RawSeason {
    id: u32,
    #[serde(default, deserialize_with = "string_or_null")]
    name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    start_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_number")]
    end_year: Option<i32>,
}

impl From<RawProgram> for Program {
    fn from(raw: RawProgram) -> Self {
        let seasons = raw
            .seasons
            .into_iter()
            .map(|season| Season {
                id: season.id,
                name: season.name,
                start_year: season.start_year,
                end_year: season.end_year,
                program_id: raw.id,
                program_abbr: raw.abbr.clone(),
            })
            .collect();
        Program {
            id: raw.id,
            name: raw.name,
            abbr: raw.abbr,
            seasons,
        }
    }
}

#[instrument(skip(http))]
pub(crate) async fn get_programs(http: &HttpClient) -> Result<Vec<Program>> {
    let url = http.config().api_url("programs");
    let response: ProgramsResponse = get_json(http, &url, &[]).await?;
    let programs: Vec<Program> = response.data.into_iter().map(Program::from).collect();
    debug!(count = programs.len(), "parsed programs");
    Ok(programs)
}
