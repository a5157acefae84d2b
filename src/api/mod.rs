//! JSON endpoints of RobotEvents and VexDB.

pub(crate) mod events;
pub(crate) mod programs;
pub(crate) mod skills;
pub(crate) mod teams;

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::{QualError, Result};
use crate::http::HttpClient;

/// GET `url` and decode the JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &HttpClient,
    url: &str,
    params: &[(&str, String)],
) -> Result<T> {
    debug!(url, "fetching json");
    let body = http.get_text(url, params).await?;
    decode(url, &body)
}

/// POST `form` to `url` and decode the JSON body.
pub(crate) async fn post_form_json<T: DeserializeOwned>(
    http: &HttpClient,
    url: &str,
    form: &[(&str, String)],
) -> Result<T> {
    debug!(url, "posting form");
    let body = http.post_form_text(url, form).await?;
    decode(url, &body)
}

pub(crate) fn decode<T: DeserializeOwned>(context: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| QualError::Json {
        context: context.to_owned(),
        source: e,
    })
}

/// Accept a number, a numeric string, or nothing. Anything unparsable becomes `None`.
pub(crate) fn lenient_number<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => n.to_string().parse().ok(),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        Some(Raw::Other(_)) | None => None,
    })
}

/// A string field that may also be `null`.
pub(crate) fn string_or_null<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient_number")]
        year: Option<i32>,
        #[serde(default, deserialize_with = "lenient_number")]
        lat: Option<f64>,
        #[serde(default, deserialize_with = "string_or_null")]
        name: String,
    }

    #[test]
    fn test_lenient_fields() {
        let sample: Sample = decode("test", r#"{"year": "2019", "lat": 28.6, "name": null}"#).unwrap();
        assert_eq!(sample.year, Some(2019));
        assert_eq!(sample.lat, Some(28.6));
        assert_eq!(sample.name, "");

        let sample: Sample = decode("test", r#"{"year": "n/a", "lat": {}}"#).unwrap();
        assert_eq!(sample.year, None);
        assert_eq!(sample.lat, None);
    }

    #[test]
    fn test_decode_error_carries_context() {
        let err = decode::<Sample>("https://example.test/api", "<html>").unwrap_err();
        assert!(err.to_string().contains("https://example.test/api"));
    }
}
