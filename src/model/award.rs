use serde::Serialize;

use super::team::TeamNumber;

/// An award given at an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Award {
    pub name: String,
    pub qualifies_for_championship: bool,
    /// `None` while results are unpublished or when the winner could not be read.
    pub team: Option<TeamNumber>,
}

impl Award {
    pub fn new(name: impl Into<String>, qualifies_for_championship: bool) -> Self {
        Self {
            name: name.into(),
            qualifies_for_championship,
            team: None,
        }
    }

    pub fn with_team(mut self, team: Option<TeamNumber>) -> Self {
        self.team = team;
        self
    }

    /// The winner of this award if it is a championship qualifier with a known team.
    pub fn qualified_team(&self) -> Option<&TeamNumber> {
        if self.qualifies_for_championship {
            self.team.as_ref()
        } else {
            None
        }
    }
}

/// One table from the awards tab of an event page, cells as plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawAwardTable {
    pub name: String,
    pub rows: Vec<RawAwardRow>,
}

/// A body row of a [`RawAwardTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawAwardRow {
    pub cells: Vec<String>,
}

impl RawAwardRow {
    pub fn new<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}
