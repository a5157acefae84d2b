use serde::Serialize;

use super::team::TeamNumber;

/// The best score of one team for one run type.
///
/// Entries scraped from an event page carry no country; season snapshots do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillsEntry {
    pub team: TeamNumber,
    pub country: String,
    pub highscore: u32,
}

impl SkillsEntry {
    pub fn new(team: TeamNumber, country: impl Into<String>, highscore: u32) -> Self {
        Self {
            team,
            country: country.into(),
            highscore,
        }
    }
}

/// One position in a skills ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedTeam {
    pub team: TeamNumber,
    pub country: String,
    pub total_score: u32,
}

/// Teams ordered by combined skills score, best first.
pub type SkillsRanking = Vec<RankedTeam>;
