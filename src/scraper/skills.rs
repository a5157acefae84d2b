use ::scraper::Selector;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::{QualError, Result};
use crate::http::HttpClient;
use crate::model::{SkillsEntry, TeamNumber};
use crate::scraper;

/// One run-type score as embedded in the event page's `<skills data="...">` element.
#[derive(Debug, Deserialize)]
struct RawSkillsScore {
    #[serde(default)]
    team: String,
    #[serde(default)]
    highscore: u32,
}

#[instrument(skip(http))]
pub(crate) async fn get_event_skills(http: &HttpClient, url: &str) -> Result<Vec<SkillsEntry>> {
    let document = scraper::get_document(http, url, &[]).await?;
    let entries = parse_event_skills(&document)?;
    debug!(count = entries.len(), "parsed event skills");
    Ok(entries)
}

/// Read the skills scores embedded in an event page. Pages without skills data yield no
/// entries; scores without a team are dropped.
pub(crate) fn parse_event_skills(document: &scraper::Html) -> Result<Vec<SkillsEntry>> {
    let selector = Selector::parse("div#skills > div > div > skills")?;
    let Some(data) = document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("data"))
    else {
        return Ok(Vec::new());
    };

    let scores: Vec<RawSkillsScore> =
        serde_json::from_str(data).map_err(|e| QualError::Json {
            context: "event skills data".to_string(),
            source: e,
        })?;

    Ok(scores
        .into_iter()
        .filter_map(|score| match TeamNumber::parse(&score.team) {
            Some(team) => Some(SkillsEntry::new(team, "", score.highscore)),
            None => {
                warn!(?score, "skipping skills score without team");
                None
            }
        })
        .collect())
}
