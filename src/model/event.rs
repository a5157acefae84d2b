use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

use super::award::Award;
use super::program::GradeLevel;

/// A single RobotEvents event (tournament, league night, skills-only meet, ...).
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: u32,
    pub sku: String,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub program_slug: Option<String>,
    pub webcast_link: Option<String>,
    pub event_entity_id: Option<u32>,
    /// Abbreviation of the owning program, e.g. `VEXU`.
    pub program: String,
    pub season_id: u32,
    /// Absolute URL of the event's result page.
    pub url: String,
    pub(crate) awards: AwardList,
}

/// The award list of an event, fetched at most once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AwardList {
    #[default]
    Absent,
    Loaded(Vec<Award>),
}

impl Event {
    /// The loaded award list, or `None` if it has not been fetched yet.
    pub fn awards(&self) -> Option<&[Award]> {
        match &self.awards {
            AwardList::Absent => None,
            AwardList::Loaded(awards) => Some(awards),
        }
    }

    pub fn has_awards_loaded(&self) -> bool {
        matches!(self.awards, AwardList::Loaded(_))
    }

    /// Championship-qualifying awards, if the award list is loaded.
    pub fn qualifying_awards(&self) -> Option<Vec<&Award>> {
        self.awards().map(|awards| {
            awards
                .iter()
                .filter(|award| award.qualifies_for_championship)
                .collect()
        })
    }

    /// Store a freshly fetched award list. An already loaded list is kept.
    pub(crate) fn store_awards(&mut self, awards: Vec<Award>) -> &[Award] {
        if let AwardList::Absent = self.awards {
            self.awards = AwardList::Loaded(awards);
        }
        match &self.awards {
            AwardList::Loaded(awards) => awards,
            AwardList::Absent => &[],
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.sku)
    }
}

/// Which part of the calendar to list events from.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum EventWhen {
    Past,
    #[default]
    Future,
    /// Past and future events; the API has no single call for this.
    All,
}

/// Filters for event discovery.
///
/// `grade_level`, `level_class_id`, the date range and `qualifies_for_worlds` are only
/// supported by the search pages, so setting any of them makes the client crawl those first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventFilter {
    pub when: EventWhen,
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub grade_level: Option<GradeLevel>,
    pub level_class_id: Option<u32>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub qualifies_for_worlds: bool,
}

impl EventFilter {
    pub fn requires_search_crawl(&self) -> bool {
        self.grade_level.is_some()
            || self.level_class_id.is_some()
            || self.from_date.is_some()
            || self.to_date.is_some()
            || self.qualifies_for_worlds
    }

    pub(crate) fn search_query(&self, season_id: u32) -> SearchQuery {
        SearchQuery {
            season_id: Some(season_id),
            grade_level: self.grade_level,
            level_class_id: self.level_class_id,
            from_date: self.from_date,
            to_date: self.to_date,
            qualifies_for_worlds: self.qualifies_for_worlds,
        }
    }
}

/// Query for the event search result pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub season_id: Option<u32>,
    pub grade_level: Option<GradeLevel>,
    pub level_class_id: Option<u32>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub qualifies_for_worlds: bool,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn event(sku: &str, date: Option<NaiveDate>) -> Event {
        Event {
            id: 1,
            sku: sku.to_string(),
            name: format!("Event {sku}"),
            date,
            address: String::new(),
            lat: None,
            lng: None,
            phone: None,
            email: None,
            program_slug: None,
            webcast_link: None,
            event_entity_id: None,
            program: "VEXU".to_string(),
            season_id: 131,
            url: format!("https://www.robotevents.com/robot-competitions/college-competition/{sku}.html"),
            awards: AwardList::Absent,
        }
    }

    #[test]
    fn test_awards_stored_once() {
        let mut event = event("RE-VEXU-19-0001", None);
        assert!(event.awards().is_none());
        assert!(event.qualifying_awards().is_none());

        let first = vec![Award::new("Excellence Award", true), Award::new("Judges Award", false)];
        assert_eq!(event.store_awards(first.clone()).len(), 2);
        assert!(event.has_awards_loaded());

        event.store_awards(vec![]);
        assert_eq!(event.awards(), Some(first.as_slice()));
        assert_eq!(event.qualifying_awards().map(|a| a.len()), Some(1));
    }

    #[test]
    fn test_filter_crawl_requirement() {
        assert!(!EventFilter::default().requires_search_crawl());
        let filter = EventFilter {
            qualifies_for_worlds: true,
            ..EventFilter::default()
        };
        assert!(filter.requires_search_crawl());
        assert_eq!(filter.search_query(131).season_id, Some(131));
    }
}
