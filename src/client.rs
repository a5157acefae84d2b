use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{QualError, Result};
use crate::http::HttpClient;
use crate::model::*;
use crate::qualification::{
    aggregate_season, compute_event_qualifications, extract_awards, rank_skills,
    rank_skills_for_country,
};
use crate::{api, scraper};

/// The main entry point for talking to RobotEvents and VexDB.
///
/// `RobotEventsClient` wraps a [`reqwest::Client`] with retry and timeout settings and
/// exposes the lookups the qualification rules need: programs and seasons, events, award
/// tables, skills scores and the team registry.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> robotevents_quals::Result<()> {
/// use robotevents_quals::{EventFilter, GradeLevel, RobotEventsClient};
///
/// let client = RobotEventsClient::new()?;
/// let program = client.get_program("VEXU").await?;
/// let season = program.current_season().expect("program has seasons");
/// let report = client
///     .season_report(season, &EventFilter::default(), "United States", GradeLevel::College)
///     .await?;
/// println!("{report}");
/// # Ok(())
/// # }
/// ```
pub struct RobotEventsClient {
    http: HttpClient,
}

impl RobotEventsClient {
    /// Create a new client with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom endpoints, timeouts and retry settings.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// The client's own timeout and user agent apply; `config` still provides the endpoints
    /// and retry settings.
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            http: HttpClient::with_client(client, config),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// Fetch every program with its seasons.
    #[instrument(skip(self))]
    pub async fn get_programs(&self) -> Result<Vec<Program>> {
        api::programs::get_programs(&self.http).await
    }

    /// Fetch one program by abbreviation (`VEXU`) or full name (`VEX U`).
    #[instrument(skip(self))]
    pub async fn get_program(&self, query: &str) -> Result<Program> {
        self.get_programs()
            .await?
            .into_iter()
            .find(|program| program.matches(query))
            .ok_or_else(|| QualError::ProgramNotFound(query.to_string()))
    }

    /// Resolve a season of `program`, defaulting to the current one.
    pub fn select_season<'a>(program: &'a Program, season_id: Option<u32>) -> Result<&'a Season> {
        let season = match season_id {
            Some(id) => program.season(id),
            None => program.current_season(),
        };
        season.ok_or_else(|| QualError::SeasonNotFound {
            program: program.abbr.clone(),
            season_id: season_id.unwrap_or_default(),
        })
    }

    /// List the events of a season.
    ///
    /// Filters the API cannot apply (grade level, date range, World Championship qualifier)
    /// are resolved by crawling the search pages first and keeping only the SKUs found there.
    #[instrument(skip(self, season, filter), fields(season = season.id))]
    pub async fn get_events(&self, season: &Season, filter: &EventFilter) -> Result<Vec<Event>> {
        let sku_filter = if filter.requires_search_crawl() {
            Some(self.scrape_event_skus(&filter.search_query(season.id)).await?)
        } else {
            None
        };

        let mut events = api::events::get_events(&self.http, season, filter).await?;
        if let Some(skus) = sku_filter {
            events.retain(|event| skus.contains(&event.sku));
        }
        debug!(count = events.len(), "listed events");
        Ok(events)
    }

    /// Find one event of a season by SKU.
    #[instrument(skip(self, season), fields(season = season.id))]
    pub async fn get_event(&self, season: &Season, sku: &str) -> Result<Event> {
        let filter = EventFilter {
            when: EventWhen::All,
            ..EventFilter::default()
        };
        api::events::get_events(&self.http, season, &filter)
            .await?
            .into_iter()
            .find(|event| event.sku.eq_ignore_ascii_case(sku))
            .ok_or_else(|| QualError::EventNotFound(sku.to_string()))
    }

    /// Crawl the event search pages until the last one and collect the SKUs listed.
    #[instrument(skip(self))]
    pub async fn scrape_event_skus(&self, query: &SearchQuery) -> Result<Vec<String>> {
        let mut skus: Vec<String> = Vec::new();
        let mut page = 1;
        loop {
            let result = scraper::events::get_search_page(&self.http, query, page).await?;
            for sku in result.skus {
                if !skus.contains(&sku) {
                    skus.push(sku);
                }
            }
            if result.is_last {
                break;
            }
            page += 1;
            tokio::time::sleep(self.config().page_delay).await;
        }
        info!(count = skus.len(), pages = page, "collected event skus");
        Ok(skus)
    }

    /// Fetch the raw tables of an event's awards tab.
    #[instrument(skip(self, event), fields(sku = %event.sku))]
    pub async fn fetch_event_award_tables(&self, event: &Event) -> Result<Vec<RawAwardTable>> {
        scraper::awards::get_award_tables(&self.http, &event.url).await
    }

    /// Load the awards of `event`, fetching them only if they are not loaded yet.
    #[instrument(skip(self, event), fields(sku = %event.sku))]
    pub async fn load_awards<'a>(&self, event: &'a mut Event) -> Result<&'a [Award]> {
        if !event.has_awards_loaded() {
            let tables = self.fetch_event_award_tables(event).await?;
            let awards = extract_awards(&tables);
            debug!(count = awards.len(), "loaded awards");
            event.store_awards(awards);
        }
        Ok(event.awards().unwrap_or_default())
    }

    /// Fetch the per-run skills scores published on an event page.
    #[instrument(skip(self, event), fields(sku = %event.sku))]
    pub async fn fetch_event_skills_entries(&self, event: &Event) -> Result<Vec<SkillsEntry>> {
        scraper::skills::get_event_skills(&self.http, &event.url).await
    }

    /// Fetch the season-wide skills standings.
    #[instrument(skip(self))]
    pub async fn fetch_season_skills_entries(
        &self,
        season_id: u32,
        grade_level: GradeLevel,
    ) -> Result<Vec<SkillsEntry>> {
        api::skills::get_season_skills(&self.http, season_id, grade_level).await
    }

    /// Fetch the registered teams of a program in one country.
    #[instrument(skip(self))]
    pub async fn lookup_team_registry(
        &self,
        program: &str,
        country: &str,
    ) -> Result<Vec<RegisteredTeam>> {
        api::teams::get_teams(&self.http, program, country).await
    }

    /// Qualified teams of a single event: its award winners plus the skills backfill from the
    /// event's own skills ranking. Any fetch failure is returned.
    #[instrument(skip(self, event), fields(sku = %event.sku))]
    pub async fn qualify_event(&self, event: &mut Event) -> Result<EventQualification> {
        let awards = self.load_awards(event).await?.to_vec();
        let entries = self.fetch_event_skills_entries(event).await?;
        let ranking = rank_skills(&entries);
        Ok(compute_event_qualifications(&awards, &ranking))
    }

    /// Load the awards of many events concurrently. Events that fail to load are logged and
    /// returned as skipped. The returned events are in completion order.
    pub async fn load_all_awards(&self, events: Vec<Event>) -> (Vec<Event>, Vec<SkippedEvent>) {
        let outcomes: Vec<(Event, Result<()>)> = stream::iter(events)
            .map(|mut event| async move {
                let result = self.load_awards(&mut event).await.map(|_| ());
                (event, result)
            })
            .buffer_unordered(self.config().concurrency.max(1))
            .collect()
            .await;

        let mut loaded = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();
        for (event, result) in outcomes {
            match result {
                Ok(()) => loaded.push(event),
                Err(e) => {
                    warn!(sku = %event.sku, error = %e, "skipping event");
                    skipped.push(SkippedEvent {
                        sku: event.sku,
                        reason: e.to_string(),
                    });
                }
            }
        }
        skipped.sort_by(|a, b| a.sku.cmp(&b.sku));
        (loaded, skipped)
    }

    /// Build the season qualification report for one country.
    ///
    /// Events that cannot be fetched are skipped and listed in the report; failures of the
    /// season-wide lookups (events, skills, registry) abort the report.
    #[instrument(skip(self, season, filter), fields(season = season.id))]
    pub async fn season_report(
        &self,
        season: &Season,
        filter: &EventFilter,
        country: &str,
        grade_level: GradeLevel,
    ) -> Result<QualificationReport> {
        let events = self.get_events(season, filter).await?;
        info!(count = events.len(), "fetching event awards");
        let (events, skipped) = self.load_all_awards(events).await;

        let registry = self
            .lookup_team_registry(&season.program_abbr, country)
            .await?;
        let roster = TeamRoster::from_registry(country, &registry);

        let entries = self
            .fetch_season_skills_entries(season.id, grade_level)
            .await?;
        let ranking = rank_skills_for_country(&entries, country);

        Ok(aggregate_season(
            events,
            skipped,
            &roster,
            &ranking,
            Some(season.name.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> Program {
        let season = |id| Season {
            id,
            name: format!("Season {id}"),
            start_year: None,
            end_year: None,
            program_id: 4,
            program_abbr: "VEXU".to_string(),
        };
        Program {
            id: 4,
            name: "VEX U".to_string(),
            abbr: "VEXU".to_string(),
            seasons: vec![season(125), season(131)],
        }
    }

    #[test]
    fn test_select_season() {
        let program = program();
        assert_eq!(RobotEventsClient::select_season(&program, None).unwrap().id, 131);
        assert_eq!(
            RobotEventsClient::select_season(&program, Some(125)).unwrap().id,
            125
        );
        assert!(matches!(
            RobotEventsClient::select_season(&program, Some(1)),
            Err(QualError::SeasonNotFound { season_id: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_loaded_awards_are_not_refetched() {
        let config = ClientConfig {
            robotevents_url: "http://127.0.0.1:9".to_string(),
            max_retries: 0,
            ..ClientConfig::default()
        };
        let client = RobotEventsClient::with_config(config).unwrap();
        let mut event = test_event("RE-VEXU-19-0001", None);
        event.url = "http://127.0.0.1:9/unreachable.html".to_string();
        event.store_awards(vec![Award::new("Excellence Award", true)]);

        let awards = client.load_awards(&mut event).await.unwrap();
        assert_eq!(awards.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_events_are_skipped() {
        let config = ClientConfig {
            max_retries: 0,
            ..ClientConfig::default()
        };
        let client = RobotEventsClient::with_config(config).unwrap();

        let mut cached = test_event("RE-VEXU-19-0001", None);
        cached.store_awards(vec![]);
        let mut broken = test_event("RE-VEXU-19-0002", None);
        broken.url = "http://127.0.0.1:9/unreachable.html".to_string();

        let (loaded, skipped) = client.load_all_awards(vec![broken, cached]).await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].sku, "RE-VEXU-19-0001");
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].sku, "RE-VEXU-19-0002");
    }

    #[tokio::test]
    #[ignore = "hits robotevents.com"]
    async fn test_get_programs() {
        let client = RobotEventsClient::new().unwrap();
        let program = client.get_program("VEXU").await.unwrap();
        assert!(program.current_season().is_some());
    }

    #[tokio::test]
    #[ignore = "hits robotevents.com"]
    async fn test_scrape_event_skus() {
        let client = RobotEventsClient::new().unwrap();
        let query = SearchQuery {
            grade_level: Some(GradeLevel::College),
            qualifies_for_worlds: true,
            ..SearchQuery::default()
        };
        let skus = client.scrape_event_skus(&query).await.unwrap();
        assert!(skus.iter().all(|sku| sku.starts_with("RE-")));
    }
}
