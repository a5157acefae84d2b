use std::fmt::{Display, Formatter};

use itertools::Itertools;
use tracing::info;

use super::engine::{compute_event_qualifications, compute_season_qualifications};
use crate::model::{
    Event, EventQualification, EventSummary, QualificationReport, RankedTeam, SkippedEvent,
    TeamRoster,
};

/// Sort events into the order the slot accounting expects: by date, then SKU. Events without
/// a date go last.
pub fn sort_canonical(events: &mut [Event]) {
    events.sort_by(|a, b| {
        (a.date.is_none(), a.date, &a.sku).cmp(&(b.date.is_none(), b.date, &b.sku))
    });
}

/// Build the season report for the country of `roster`.
///
/// `events` may arrive in any order (e.g. fetch completion order); they are sorted into
/// canonical order before any slot is counted. Events whose awards were never loaded count as
/// having no awards.
pub fn aggregate_season(
    mut events: Vec<Event>,
    skipped: Vec<SkippedEvent>,
    roster: &TeamRoster,
    season_ranking: &[RankedTeam],
    season: Option<String>,
) -> QualificationReport {
    sort_canonical(&mut events);

    let summaries: Vec<EventSummary> = events
        .iter()
        .map(|event| {
            let awards = event.awards().unwrap_or_default();
            EventSummary {
                sku: event.sku.clone(),
                name: event.name.clone(),
                date: event.date,
                published: awards.iter().any(|award| award.team.is_some()),
                qualification: compute_event_qualifications(awards, &[]),
            }
        })
        .collect();

    let season_result = compute_season_qualifications(
        events
            .iter()
            .map(|event| event.awards().unwrap_or_default()),
        roster,
        season_ranking,
    );

    info!(
        country = %roster.country,
        events = summaries.len(),
        skipped = skipped.len(),
        qualified = season_result.award_qualified.len(),
        skills_slots = season_result.skills_slots,
        "aggregated season report"
    );

    QualificationReport {
        country: season_result.country.clone(),
        season,
        open_slots: season_result.unfilled_slots(),
        qualified: season_result.award_qualified,
        skills_slots: season_result.skills_slots,
        candidates: season_result.skills_qualified,
        events: summaries,
        skipped,
    }
}

impl Display for QualificationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.season {
            Some(season) => writeln!(f, "{season} ({})", self.country)?,
            None => writeln!(f, "{}", self.country)?,
        }
        writeln!(f)?;

        writeln!(f, "The following teams have qualified through events:")?;
        if self.qualified.is_empty() {
            writeln!(f, "  (none)")?;
        } else {
            writeln!(f, "  {}", self.qualified.iter().join(", "))?;
        }
        writeln!(
            f,
            "As a result, there are {} qualification spots available for skills",
            self.skills_slots
        )?;

        if !self.candidates.is_empty() {
            writeln!(
                f,
                "As of right now, the following teams from {} may qualify through skills:",
                self.country
            )?;
            for (position, candidate) in self.candidates.iter().enumerate() {
                writeln!(
                    f,
                    "  {:>2}. {} ({} points)",
                    position + 1,
                    candidate.team,
                    candidate.total_score
                )?;
            }
        }
        if self.open_slots > 0 {
            writeln!(
                f,
                "{} spot(s) have no eligible skills team yet",
                self.open_slots
            )?;
        }

        if !self.events.is_empty() {
            writeln!(f)?;
            writeln!(f, "Events:")?;
            for event in &self.events {
                let date = event
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "----------".to_string());
                let teams = if event.published {
                    event.qualification.qualified.iter().join(", ")
                } else {
                    "results not published".to_string()
                };
                writeln!(f, "  {date}  {}  {}: {teams}", event.sku, event.name)?;
            }
        }

        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped events:")?;
            for skipped in &self.skipped {
                writeln!(f, "  {}: {}", skipped.sku, skipped.reason)?;
            }
        }
        Ok(())
    }
}

impl Display for EventQualification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Qualified through awards: {}",
            self.qualified[..self.via_awards].iter().join(", ")
        )?;
        writeln!(f, "Spots freed for skills: {}", self.skills_slots)?;
        if self.via_skills > 0 {
            writeln!(
                f,
                "Qualified through skills: {}",
                self.skills_qualified().iter().join(", ")
            )?;
        }
        if self.unfilled_slots() > 0 {
            writeln!(f, "Unfilled spots: {}", self.unfilled_slots())?;
        }
        Ok(())
    }
}
