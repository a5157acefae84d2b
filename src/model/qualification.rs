use chrono::NaiveDate;
use serde::Serialize;

use super::skills::RankedTeam;
use super::team::TeamNumber;

/// Qualified teams of a single event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventQualification {
    /// Distinct teams in order of discovery: award winners first, then skills backfill.
    pub qualified: Vec<TeamNumber>,
    /// Teams qualified through awards.
    pub via_awards: usize,
    /// Slots freed by teams that won more than one qualifying award.
    pub skills_slots: usize,
    /// Freed slots that were given to skills-ranked teams.
    pub via_skills: usize,
}

impl EventQualification {
    pub fn unfilled_slots(&self) -> usize {
        self.skills_slots - self.via_skills
    }

    /// Teams that qualified through the skills ranking.
    pub fn skills_qualified(&self) -> &[TeamNumber] {
        &self.qualified[self.via_awards..]
    }
}

/// Qualification across every event of a season, restricted to one country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeasonQualification {
    pub country: String,
    /// Qualifying award assignments with a known team from the country.
    pub assignments: usize,
    /// Distinct award-qualified teams in order of discovery.
    pub award_qualified: Vec<TeamNumber>,
    /// `assignments - award_qualified.len()`.
    pub skills_slots: usize,
    /// Skills-ranked teams that take the freed slots, best first.
    pub skills_qualified: Vec<RankedTeam>,
}

impl SeasonQualification {
    pub fn unfilled_slots(&self) -> usize {
        self.skills_slots - self.skills_qualified.len()
    }
}

/// Award-based result of one event inside a season report.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub sku: String,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub published: bool,
    pub qualification: EventQualification,
}

/// An event that could not be fetched and was left out of the aggregation.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedEvent {
    pub sku: String,
    pub reason: String,
}

/// The season-wide qualification picture for one country.
#[derive(Debug, Clone, Serialize)]
pub struct QualificationReport {
    pub country: String,
    pub season: Option<String>,
    /// Teams already qualified through events.
    pub qualified: Vec<TeamNumber>,
    /// Slots that go to the skills ranking.
    pub skills_slots: usize,
    /// Teams that would take those slots if the season ended now.
    pub candidates: Vec<RankedTeam>,
    /// Slots no ranked team is available for.
    pub open_slots: usize,
    pub events: Vec<EventSummary>,
    pub skipped: Vec<SkippedEvent>,
}
