use std::sync::LazyLock;

use ::scraper::{CaseSensitivity, Selector};
use itertools::Itertools;
use regex::Regex;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::http::HttpClient;
use crate::model::SearchQuery;
use crate::scraper;

const SEARCH_DATE_FORMAT: &str = "%m/%d/%Y";

static SKU_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"RE-[A-Za-z]*-[0-9]{2}-[0-9]{4}").unwrap_or_else(|_| unreachable!())
});

/// One page of event search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchPage {
    pub skus: Vec<String>,
    pub is_last: bool,
}

/// Extract an event SKU such as `RE-VEXU-19-0123` from a URL.
pub fn sku_from_url(url: &str) -> Option<&str> {
    SKU_PATTERN.find(url).map(|m| m.as_str())
}

#[instrument(skip(http))]
pub(crate) async fn get_search_page(
    http: &HttpClient,
    query: &SearchQuery,
    page: u32,
) -> Result<SearchPage> {
    let url = http.config().search_url();
    let document = scraper::get_document(http, &url, &search_params(query, page)).await?;
    let result = parse_search_page(&document)?;
    debug!(count = result.skus.len(), page, is_last = result.is_last, "parsed search page");
    Ok(result)
}

fn search_params(query: &SearchQuery, page: u32) -> Vec<(&'static str, String)> {
    let format_date = |date: Option<chrono::NaiveDate>| {
        date.map(|d| d.format(SEARCH_DATE_FORMAT).to_string())
            .unwrap_or_default()
    };
    vec![
        (
            "grade_level",
            query
                .grade_level
                .map(|g| g.search_id().to_string())
                .unwrap_or_default(),
        ),
        (
            "level_class_id",
            query
                .level_class_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        ),
        ("from_date", format_date(query.from_date)),
        ("to_date", format_date(query.to_date)),
        ("country_id", "*".to_string()),
        (
            "qual_wc",
            if query.qualifies_for_worlds { "1" } else { "" }.to_string(),
        ),
        (
            "seasonId",
            query.season_id.map(|id| id.to_string()).unwrap_or_default(),
        ),
        ("page", page.to_string()),
    ]
}

/// Parse the result links and the pagination state of a search page. A page without a
/// pagination bar is the last one.
pub(crate) fn parse_search_page(document: &scraper::Html) -> Result<SearchPage> {
    let link_selector = Selector::parse("div[class*='results'] > div > p > strong > a")?;
    let skus = document
        .select(&link_selector)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(sku_from_url)
        .map(str::to_string)
        .unique()
        .collect_vec();

    let next_selector = Selector::parse("ul.pagination > li:last-child")?;
    let is_last = document.select(&next_selector).next().map_or(true, |next| {
        next.value()
            .has_class("disabled", CaseSensitivity::AsciiCaseInsensitive)
    });

    Ok(SearchPage { skus, is_last })
}
