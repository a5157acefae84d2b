use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{lenient_number, post_form_json, string_or_null};
use crate::config::ClientConfig;
use crate::error::{QualError, Result};
use crate::http::HttpClient;
use crate::model::{AwardList, Event, EventFilter, EventWhen, Season};

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    data: Vec<RawEvent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawEvent {
    #[serde(deserialize_with = "lenient_number")]
    id: Option<u32>,
    #[serde(deserialize_with = "string_or_null")]
    sku: String,
    #[serde(deserialize_with = "string_or_null")]
    name: String,
    date: Option<String>,
    #[serde(deserialize_with = "string_or_null")]
    address: String,
    #[serde(deserialize_with = "lenient_number")]
    lat: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    lng: Option<f64>,
    phone: Option<String>,
    email: Option<String>,
    program_slug: Option<String>,
    webcast_link: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    event_entity_id: Option<u32>,
}

impl Event {
    /// Build an event of `season` from an API record. Records without a SKU are rejected;
    /// other missing fields fall back to empty values.
    pub(crate) fn from_raw(raw: RawEvent, season: &Season, config: &ClientConfig) -> Result<Self> {
        let sku = raw.sku.trim().to_string();
        if sku.is_empty() {
            return Err(QualError::MalformedRecord {
                context: "event",
                detail: format!("missing sku for {:?}", raw.name),
            });
        }
        let url = config.event_page_url(&season.program_abbr, &sku)?;
        let date = raw.date.as_deref().and_then(|text| {
            let parsed = parse_event_date(text);
            if parsed.is_none() {
                warn!(sku = %sku, date = text, "unrecognized event date");
            }
            parsed
        });

        Ok(Event {
            id: raw.id.unwrap_or_default(),
            sku,
            name: raw.name,
            date,
            address: raw.address,
            lat: raw.lat,
            lng: raw.lng,
            phone: raw.phone,
            email: raw.email,
            program_slug: raw.program_slug,
            webcast_link: raw.webcast_link,
            event_entity_id: raw.event_entity_id,
            program: season.program_abbr.clone(),
            season_id: season.id,
            url,
            awards: AwardList::Absent,
        })
    }
}

/// Accepts RFC 3339 timestamps, `YYYY-MM-DD HH:MM:SS` and plain `YYYY-MM-DD`.
fn parse_event_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    text.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}

fn events_form(season: &Season, filter: &EventFilter, when: EventWhen) -> Vec<(&'static str, String)> {
    let text = |value: &Option<String>, fallback: &str| {
        value.clone().unwrap_or_else(|| fallback.to_string())
    };
    let coordinate = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    vec![
        ("programs", season.program_id.to_string()),
        ("when", when.to_string()),
        ("what", "events".to_string()),
        ("season_id", season.id.to_string()),
        ("city", text(&filter.city, "")),
        ("lat", coordinate(filter.lat)),
        ("lng", coordinate(filter.lng)),
        ("country", text(&filter.country, "All")),
        ("region", text(&filter.region, "N/A")),
    ]
}

async fn post_events(
    http: &HttpClient,
    season: &Season,
    filter: &EventFilter,
    when: EventWhen,
) -> Result<Vec<RawEvent>> {
    let url = http.config().api_url("events");
    let response: EventsResponse =
        post_form_json(http, &url, &events_form(season, filter, when)).await?;
    Ok(response.data)
}

/// List the events of `season` matching the API-side parts of `filter`.
#[instrument(skip(http, season, filter), fields(season = season.id, when = %filter.when))]
pub(crate) async fn get_events(
    http: &HttpClient,
    season: &Season,
    filter: &EventFilter,
) -> Result<Vec<Event>> {
    let raw = match filter.when {
        EventWhen::All => {
            let mut raw = post_events(http, season, filter, EventWhen::Past).await?;
            raw.extend(post_events(http, season, filter, EventWhen::Future).await?);
            raw
        }
        when => post_events(http, season, filter, when).await?,
    };

    let events: Vec<Event> = raw
        .into_iter()
        .filter_map(|raw| match Event::from_raw(raw, season, http.config()) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(error = %e, "dropping event record");
                None
            }
        })
        .collect();
    debug!(count = events.len(), "parsed events");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode;

    fn season() -> Season {
        Season {
            id: 131,
            name: "VEX U 2019-2020".to_string(),
            start_year: Some(2019),
            end_year: Some(2020),
            program_id: 4,
            program_abbr: "VEXU".to_string(),
        }
    }

    #[test]
    fn test_events_response() {
        let body = r#"{"data": [
            {"id": "27101", "sku": "RE-VEXU-19-0123", "name": "Fall Classic",
             "date": "2019-10-12 00:00:00", "address": "4000 Central Florida Blvd",
             "lat": "28.60", "lng": -81.20, "phone": null, "email": "",
             "program_slug": "vexu", "webcast_link": null, "event_entity_id": 12,
             "ignored": [1, 2]},
            {"id": 27102, "sku": "", "name": "Broken"},
            {"id": 27103, "sku": "RE-VEXU-19-0456", "name": "Winter Open", "date": "TBD"}
        ]}"#;
        let response: EventsResponse = decode("events", body).unwrap();
        let config = ClientConfig::default();
        let events: Vec<Event> = response
            .data
            .into_iter()
            .filter_map(|raw| Event::from_raw(raw, &season(), &config).ok())
            .collect();

        assert_eq!(events.len(), 2);
        let first = &events[0];
        assert_eq!(first.id, 27101);
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2019, 10, 12));
        assert_eq!(first.lat, Some(28.6));
        assert_eq!(first.program, "VEXU");
        assert_eq!(first.season_id, 131);
        assert_eq!(
            first.url,
            "https://www.robotevents.com/robot-competitions/college-competition/RE-VEXU-19-0123.html"
        );
        assert!(first.awards().is_none());
        assert_eq!(events[1].date, None);
    }

    #[test]
    fn test_event_without_sku_is_rejected() {
        let raw = RawEvent {
            name: "Broken".to_string(),
            ..RawEvent::default()
        };
        let result = Event::from_raw(raw, &season(), &ClientConfig::default());
        assert!(matches!(
            result,
            Err(QualError::MalformedRecord { context: "event", .. })
        ));
    }

    #[test]
    fn test_event_dates() {
        let expected = NaiveDate::from_ymd_opt(2020, 2, 1);
        assert_eq!(parse_event_date("2020-02-01T08:00:00-05:00"), expected);
        assert_eq!(parse_event_date("2020-02-01 00:00:00"), expected);
        assert_eq!(parse_event_date("2020-02-01"), expected);
        assert_eq!(parse_event_date("02/01/2020"), None);
    }

    #[test]
    fn test_events_form_defaults() {
        let form = events_form(&season(), &EventFilter::default(), EventWhen::Past);
        assert!(form.contains(&("programs", "4".to_string())));
        assert!(form.contains(&("when", "past".to_string())));
        assert!(form.contains(&("country", "All".to_string())));
        assert!(form.contains(&("region", "N/A".to_string())));
        assert!(form.contains(&("season_id", "131".to_string())));
    }
}
