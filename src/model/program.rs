use serde::{Deserialize, Serialize};
use strum_macros::{EnumString, FromRepr};

/// A competition program (VRC, VEXU, VIQC, ...) and its seasons.
#[derive(Debug, Clone, Serialize)]
pub struct Program {
    pub id: u32,
    pub name: String,
    pub abbr: String,
    pub seasons: Vec<Season>,
}

impl Program {
    /// The most recent season, by id.
    pub fn current_season(&self) -> Option<&Season> {
        self.seasons.iter().max_by_key(|season| season.id)
    }

    pub fn season(&self, season_id: u32) -> Option<&Season> {
        self.seasons.iter().find(|season| season.id == season_id)
    }

    /// Whether `query` names this program, by abbreviation or full name.
    pub fn matches(&self, query: &str) -> bool {
        self.abbr.eq_ignore_ascii_case(query) || self.name == query
    }
}

/// A yearly competition cycle of one program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Season {
    pub id: u32,
    pub name: String,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub program_id: u32,
    pub program_abbr: String,
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Grade level filter. The discriminant is the id used by the event search pages and the
/// display form is the name used by the skills API.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    strum_macros::Display,
    FromRepr,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum GradeLevel {
    #[strum(to_string = "Elementary School", serialize = "elementary")]
    Elementary = 1,
    #[strum(to_string = "Middle School", serialize = "middle")]
    MiddleSchool = 2,
    #[strum(to_string = "High School", serialize = "high")]
    HighSchool = 3,
    #[strum(to_string = "College")]
    College = 4,
}

impl GradeLevel {
    pub fn search_id(self) -> u8 {
        self as u8
    }
}
