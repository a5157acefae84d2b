use tracing::debug;

use crate::model::{Award, RawAwardTable, TeamNumber};

/// Name of the table that lists every award of an event and what it qualifies for.
pub const AWARDS_TABLE: &str = "Awards";

/// Marker in the qualification column of a championship-qualifying award.
pub const CHAMPIONSHIP_MARKER: &str = "World Championship";

/// Build the award list of an event from the tables of its awards tab, in page order.
///
/// The "Awards" table lists every award and what it qualifies for. Published results add one
/// table per award group naming the winners; RobotEvents moves "Awards" after those, so
/// "Awards" coming first means nothing has been handed out yet and every team stays unknown.
pub fn extract_awards(tables: &[RawAwardTable]) -> Vec<Award> {
    let Some(awards_table) = tables.iter().find(|table| table.name == AWARDS_TABLE) else {
        return Vec::new();
    };

    let mut awards: Vec<Award> = awards_table
        .rows
        .iter()
        .filter_map(|row| {
            let name = row.cell(0)?.trim();
            if name.is_empty() {
                return None;
            }
            let scope = row.cell(1).unwrap_or_default();
            Some(Award::new(name, scope.contains(CHAMPIONSHIP_MARKER)))
        })
        .collect();

    let published = tables
        .first()
        .is_some_and(|table| table.name != AWARDS_TABLE);
    if !published {
        debug!(awards = awards.len(), "award results not published");
        return awards;
    }

    for table in tables.iter().filter(|table| table.name != AWARDS_TABLE) {
        for row in &table.rows {
            let Some(name) = row.cell(0).map(str::trim) else {
                continue;
            };
            let team = row.cell(1).and_then(TeamNumber::parse);
            assign_winner(&mut awards, name, team);
        }
    }

    awards
}

/// Attach `team` to the first award called `name` that has no winner yet. Awards shared by
/// several teams (alliances) are listed once, so further winners get a copy of the award
/// right after its last occurrence.
fn assign_winner(awards: &mut Vec<Award>, name: &str, team: Option<TeamNumber>) {
    if let Some(open) = awards
        .iter_mut()
        .find(|award| award.name == name && award.team.is_none())
    {
        open.team = team;
        return;
    }
    if team.is_none() {
        return;
    }
    if let Some(last) = awards.iter().rposition(|award| award.name == name) {
        let extra = awards[last].clone().with_team(team);
        awards.insert(last + 1, extra);
    }
}
