use std::time::Duration;

use crate::error::{QualError, Result};

/// Program abbreviation to the path segment used by RobotEvents event pages.
pub const PROGRAM_PATHS: &[(&str, &str)] = &[
    ("VIQC", "vex-iq-challenge"),
    ("VRC", "vex-robotics-competition"),
    ("VEXU", "college-competition"),
    ("TIQC", "tsaviqc"),
    ("TVRC", "tsavrc"),
    ("CREATE", "create-foundation"),
    ("WORKSHOP", "workshops"),
    ("RAD", "rad"),
    ("DIS", "drones-in-school"),
    ("NRL", "national-robotics-league"),
];

/// Look up the event page path segment for a program abbreviation.
pub fn program_path(abbr: &str) -> Result<&'static str> {
    PROGRAM_PATHS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(abbr))
        .map(|(_, path)| *path)
        .ok_or_else(|| QualError::UnknownProgram(abbr.to_string()))
}

/// Endpoints and transport settings for [`RobotEventsClient`](crate::RobotEventsClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub robotevents_url: String,
    pub vexdb_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Extra attempts after the first one for transient failures.
    pub max_retries: u32,
    /// Delay before the first retry; doubled on every further attempt.
    pub retry_backoff: Duration,
    /// Maximum number of event pages fetched at the same time.
    pub concurrency: usize,
    /// Pause between two search result pages.
    pub page_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            robotevents_url: "https://www.robotevents.com".to_string(),
            vexdb_url: "https://api.vexdb.io/v1".to_string(),
            user_agent: concat!("robotevents-quals/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_backoff: Duration::from_millis(500),
            concurrency: 4,
            page_delay: Duration::from_millis(100),
        }
    }
}

impl ClientConfig {
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.robotevents_url)
    }

    pub(crate) fn search_url(&self) -> String {
        format!("{}/robot-competitions/all", self.robotevents_url)
    }

    pub(crate) fn event_page_url(&self, program_abbr: &str, sku: &str) -> Result<String> {
        let path = program_path(program_abbr)?;
        Ok(format!(
            "{}/robot-competitions/{path}/{sku}.html",
            self.robotevents_url
        ))
    }

    /// Backoff before retry number `attempt` (starting at 1).
    pub(crate) fn backoff_for(&self, attempt: u32) -> Duration {
        self.retry_backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_path_lookup() {
        assert_eq!(program_path("VEXU").unwrap(), "college-competition");
        assert_eq!(program_path("vrc").unwrap(), "vex-robotics-competition");
        assert!(matches!(
            program_path("FRC"),
            Err(QualError::UnknownProgram(abbr)) if abbr == "FRC"
        ));
    }

    #[test]
    fn test_event_page_url() {
        let config = ClientConfig::default();
        let url = config.event_page_url("VEXU", "RE-VEXU-19-0123").unwrap();
        assert_eq!(
            url,
            "https://www.robotevents.com/robot-competitions/college-competition/RE-VEXU-19-0123.html"
        );
    }

    #[test]
    fn test_backoff_doubles() {
        let config = ClientConfig {
            retry_backoff: Duration::from_millis(100),
            ..ClientConfig::default()
        };
        assert_eq!(config.backoff_for(1), Duration::from_millis(100));
        assert_eq!(config.backoff_for(2), Duration::from_millis(200));
        assert_eq!(config.backoff_for(3), Duration::from_millis(400));
    }
}
