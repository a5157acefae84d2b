//! Qualification rules. Everything here is pure and works on already fetched data.

pub mod awards;
pub mod engine;
pub mod report;
pub mod skills;

pub use awards::extract_awards;
pub use engine::{compute_event_qualifications, compute_season_qualifications};
pub use report::{aggregate_season, sort_canonical};
pub use skills::{rank_skills, rank_skills_for_country};
