//! Slot accounting for World Championship qualification.
//!
//! Every qualifying award is one slot at the championship. A team that wins several
//! qualifying awards only needs one of them, so each further award it holds frees a slot,
//! and freed slots go down the skills ranking to the best teams that have not qualified yet.

use std::collections::HashSet;

use tracing::debug;

use crate::model::{
    Award, EventQualification, RankedTeam, SeasonQualification, TeamNumber, TeamRoster,
};

/// Distinct teams in insertion order.
#[derive(Debug, Default)]
struct QualifiedSet {
    order: Vec<TeamNumber>,
    seen: HashSet<TeamNumber>,
}

impl QualifiedSet {
    /// Returns `false` if the team was already present.
    fn insert(&mut self, team: &TeamNumber) -> bool {
        if self.seen.contains(team) {
            return false;
        }
        self.seen.insert(team.clone());
        self.order.push(team.clone());
        true
    }

    fn contains(&self, team: &TeamNumber) -> bool {
        self.seen.contains(team)
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// Insert award winners, returning the number of slots freed by repeat winners.
fn qualify_award_winners<'a>(
    qualified: &mut QualifiedSet,
    winners: impl IntoIterator<Item = &'a TeamNumber>,
) -> usize {
    winners
        .into_iter()
        .filter(|team| !qualified.insert(team))
        .count()
}

/// Hand up to `slots` slots to ranked teams that are not qualified yet, best first.
/// Stops early when the ranking runs out.
fn backfill<'a>(
    qualified: &mut QualifiedSet,
    slots: usize,
    ranking: impl IntoIterator<Item = &'a RankedTeam>,
) -> Vec<&'a RankedTeam> {
    let mut filled = Vec::new();
    if slots == 0 {
        return filled;
    }
    for ranked in ranking {
        if qualified.insert(&ranked.team) {
            filled.push(ranked);
            if filled.len() == slots {
                break;
            }
        }
    }
    filled
}

/// Qualified teams of one event.
///
/// Award winners come first in award order. Qualifying awards without a known team (results
/// not published) neither qualify a team nor free a slot. Each slot freed by a repeat winner
/// goes to the best team of `skills_ranking` that is not already qualified.
pub fn compute_event_qualifications(
    awards: &[Award],
    skills_ranking: &[RankedTeam],
) -> EventQualification {
    let mut qualified = QualifiedSet::default();
    let skills_slots =
        qualify_award_winners(&mut qualified, awards.iter().filter_map(Award::qualified_team));
    let via_awards = qualified.len();

    let via_skills = backfill(&mut qualified, skills_slots, skills_ranking).len();
    if via_skills < skills_slots {
        debug!(
            skills_slots,
            via_skills, "skills ranking exhausted before all slots were filled"
        );
    }

    EventQualification {
        qualified: qualified.order,
        via_awards,
        skills_slots,
        via_skills,
    }
}

/// Qualified teams of a whole season for the country of `roster`.
///
/// Award winners of every event (in the given event order) that belong to the roster are
/// merged into one set. The slots freed by repeat winners across the season are then filled
/// once from `skills_ranking`, considering only teams from the roster's country.
pub fn compute_season_qualifications<'a, E>(
    events: E,
    roster: &TeamRoster,
    skills_ranking: &[RankedTeam],
) -> SeasonQualification
where
    E: IntoIterator<Item = &'a [Award]>,
{
    let assignments: Vec<&TeamNumber> = events
        .into_iter()
        .flat_map(|awards| awards.iter().filter_map(Award::qualified_team))
        .filter(|team| roster.contains(team))
        .collect();

    let mut qualified = QualifiedSet::default();
    let skills_slots = qualify_award_winners(&mut qualified, assignments.iter().copied());
    let award_qualified = qualified.order.clone();

    let skills_qualified: Vec<RankedTeam> = backfill(
        &mut qualified,
        skills_slots,
        skills_ranking
            .iter()
            .filter(|ranked| ranked.country == roster.country),
    )
    .into_iter()
    .cloned()
    .collect();

    debug!(
        country = %roster.country,
        assignments = assignments.len(),
        qualified = award_qualified.len(),
        skills_slots,
        "computed season qualifications"
    );

    SeasonQualification {
        country: roster.country.clone(),
        assignments: assignments.len(),
        award_qualified,
        skills_slots,
        skills_qualified,
    }
}
