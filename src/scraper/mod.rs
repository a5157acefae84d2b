pub(crate) mod awards;
pub(crate) mod events;
pub(crate) mod skills;

pub(crate) use ::scraper::Html;
use ::scraper::{ElementRef, Selector};
use tracing::debug;

use crate::error::Result;
use crate::http::HttpClient;

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn get_document(
    http: &HttpClient,
    url: &str,
    params: &[(&str, String)],
) -> Result<Html> {
    debug!(url, "fetching page");
    let body = http.get_text(url, params).await?;
    Ok(Html::parse_document(&body))
}

/// Extract trimmed text content from the first element matching `selector`
/// inside `element`. Returns an empty string if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .and_then(|d| d.text().map(|t| t.trim()).find(|t| !t.is_empty()))
        .unwrap_or_default()
        .trim()
        .replace(['\n', '\t'], "")
        .to_string()
}

/// All text below `element`, joined and trimmed.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
