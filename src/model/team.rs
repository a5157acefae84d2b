use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use serde::Serialize;

/// A normalized team number such as `1234A`.
///
/// Team numbers are compared case-insensitively on RobotEvents, so the canonical form is
/// trimmed and uppercased. A blank string is not a team.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TeamNumber(String);

impl TeamNumber {
    /// Normalize raw text into a team number, or `None` if nothing is left after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_uppercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TeamNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A team as listed by the VexDB registry.
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredTeam {
    pub number: TeamNumber,
    pub country: String,
    pub name: Option<String>,
    pub program: Option<String>,
}

/// The canonical set of a program's teams in one country.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamRoster {
    pub country: String,
    pub teams: HashSet<TeamNumber>,
}

impl TeamRoster {
    pub fn new(country: impl Into<String>, teams: impl IntoIterator<Item = TeamNumber>) -> Self {
        Self {
            country: country.into(),
            teams: teams.into_iter().collect(),
        }
    }

    /// Build a roster from registry entries, keeping only teams from `country`.
    pub fn from_registry(country: &str, registry: &[RegisteredTeam]) -> Self {
        Self::new(
            country,
            registry
                .iter()
                .filter(|team| team.country == country)
                .map(|team| team.number.clone()),
        )
    }

    pub fn contains(&self, team: &TeamNumber) -> bool {
        self.teams.contains(team)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}
