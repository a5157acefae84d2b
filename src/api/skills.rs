use serde::Deserialize;
use tracing::{debug, instrument};

use super::{get_json, lenient_number, string_or_null};
use crate::error::Result;
use crate::http::HttpClient;
use crate::model::{GradeLevel, SkillsEntry, TeamNumber};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SkillsResponse {
    List(Vec<RawSkillsRecord>),
    Wrapped { data: Vec<RawSkillsRecord> },
}

#[derive(Debug, Deserialize)]
struct RawSkillsRecord {
    team: RawSkillsTeam,
    #[serde(default)]
    scores: RawSkillsScores,
}

#[derive(Debug, Deserialize)]
struct RawSkillsTeam {
    #[serde(default, deserialize_with = "string_or_null")]
    team: String,
    #[serde(default, deserialize_with = "string_or_null")]
    country: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawSkillsScores {
    #[serde(default, deserialize_with = "lenient_number")]
    score: Option<u32>,
}

/// Convert the season snapshot into skills entries, keeping the service's order. Records
/// without a team are dropped.
fn into_entries(response: SkillsResponse) -> Vec<SkillsEntry> {
    let records = match response {
        SkillsResponse::List(records) | SkillsResponse::Wrapped { data: records } => records,
    };
    records
        .into_iter()
        .filter_map(|record| {
            let team = TeamNumber::parse(&record.team.team)?;
            Some(SkillsEntry::new(
                team,
                record.team.country,
                record.scores.score.unwrap_or_default(),
            ))
        })
        .collect()
}

/// Fetch the post-season skills standings of a season for one grade level.
#[instrument(skip(http))]
pub(crate) async fn get_season_skills(
    http: &HttpClient,
    season_id: u32,
    grade_level: GradeLevel,
) -> Result<Vec<SkillsEntry>> {
    let url = http.config().api_url(&format!("seasons/{season_id}/skills"));
    let params = [
        ("post_season", "1".to_string()),
        ("grade_level", grade_level.to_string()),
    ];
    let response: SkillsResponse = get_json(http, &url, &params).await?;
    let entries = into_entries(response);
    debug!(count = entries.len(), season_id, "parsed season skills");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode;
    use crate::qualification::rank_skills_for_country;

    #[test]
    fn test_season_skills_list() {
        let body = r#"[
            {"rank": 1, "team": {"team": "wpi1", "country": "United States"}, "scores": {"score": 180, "programming": 80, "driver": 100}},
            {"rank": 2, "team": {"team": "QUEEN", "country": "Canada"}, "scores": {"score": "170"}},
            {"rank": 3, "team": {"team": "UCF", "country": "United States"}},
            {"rank": 4, "team": {"team": null, "country": "United States"}, "scores": {"score": 10}}
        ]"#;
        let entries = into_entries(decode("skills", body).unwrap());

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].team.as_str(), "WPI1");
        assert_eq!(entries[0].highscore, 180);
        assert_eq!(entries[1].highscore, 170);
        assert_eq!(entries[2].highscore, 0);

        let ranking = rank_skills_for_country(&entries, "United States");
        assert_eq!(
            ranking.iter().map(|r| r.team.as_str()).collect::<Vec<_>>(),
            vec!["WPI1", "UCF"]
        );
    }

    #[test]
    fn test_season_skills_wrapped() {
        let body = r#"{"data": [{"team": {"team": "BLRS", "country": "United States"}, "scores": {"score": 5}}]}"#;
        let entries = into_entries(decode("skills", body).unwrap());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].country, "United States");
    }
}
