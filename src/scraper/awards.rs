use ::scraper::{ElementRef, Selector};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::http::HttpClient;
use crate::model::{RawAwardRow, RawAwardTable};
use crate::scraper::{self, element_text, select_text};

#[instrument(skip(http))]
pub(crate) async fn get_award_tables(http: &HttpClient, url: &str) -> Result<Vec<RawAwardTable>> {
    let document = scraper::get_document(http, url, &[]).await?;
    let tables = parse_award_tables(&document)?;
    debug!(count = tables.len(), "parsed award tables");
    Ok(tables)
}

/// Parse every table of the awards tab, in page order. An event page without an awards tab
/// yields no tables.
pub(crate) fn parse_award_tables(document: &scraper::Html) -> Result<Vec<RawAwardTable>> {
    let table_selector = Selector::parse("div#tab-awards > div")?;
    document
        .select(&table_selector)
        .map(|div| parse_award_table(&div))
        .collect()
}

fn parse_award_table(element: &ElementRef) -> Result<RawAwardTable> {
    let heading_selector = Selector::parse("div.panel-heading b")?;
    let name = select_text(element, &heading_selector);

    let row_selector = Selector::parse("div table tr")?;
    let cell_selector = Selector::parse("td")?;
    let rows = element
        .select(&row_selector)
        // header row
        .skip(1)
        .map(|row| RawAwardRow {
            cells: row
                .select(&cell_selector)
                .map(|cell| element_text(&cell))
                .collect_vec(),
        })
        .collect_vec();

    Ok(RawAwardTable { name, rows })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::qualification::extract_awards;

    pub(crate) const PUBLISHED_PAGE: &str = r#"
        <html><head><title>VEX U Fall Classic</title></head><body>
        <div id="tab-awards">
          <div class="panel panel-default">
            <div class="panel-heading"><b>Tournament</b></div>
            <div><table class="table">
              <tr><th>Award</th><th>Team</th></tr>
              <tr><td>Tournament Champions</td><td>ucf</td></tr>
              <tr><td>Tournament Champions</td><td><a href="/teams/WPI1">WPI1</a></td></tr>
            </table></div>
          </div>
          <div class="panel panel-default">
            <div class="panel-heading"><b>Judged</b></div>
            <div><table class="table">
              <tr><th>Award</th><th>Team</th></tr>
              <tr><td>Excellence Award</td><td>UCF</td></tr>
              <tr><td>Design Award</td><td>BLRS</td></tr>
            </table></div>
          </div>
          <div class="panel panel-default">
            <div class="panel-heading"><b>Awards</b></div>
            <div><table class="table">
              <tr><th>Award</th><th>Qualifies for</th></tr>
              <tr><td>Excellence Award</td><td>
                World Championship
              </td></tr>
              <tr><td>Tournament Champions</td><td>World Championship</td></tr>
              <tr><td>Design Award</td><td></td></tr>
            </table></div>
          </div>
        </div>
        </body></html>
    "#;

    const UNPUBLISHED_PAGE: &str = r#"
        <div id="tab-awards">
          <div>
            <div class="panel-heading"><b>Awards</b></div>
            <div><table>
              <tr><th>Award</th><th>Qualifies for</th></tr>
              <tr><td>Excellence Award</td><td>World Championship</td></tr>
            </table></div>
          </div>
        </div>
    "#;

    #[test]
    fn test_parse_published_tables() {
        let document = scraper::Html::parse_document(PUBLISHED_PAGE);
        let tables = parse_award_tables(&document).unwrap();

        assert_eq!(
            tables.iter().map(|t| t.name.as_str()).collect_vec(),
            vec!["Tournament", "Judged", "Awards"]
        );
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[0].rows[1].cell(1), Some("WPI1"));
        assert_eq!(tables[2].rows[0].cell(1), Some("World Championship"));

        let awards = extract_awards(&tables);
        let winners = awards
            .iter()
            .filter_map(|a| a.qualified_team().map(|t| t.as_str()))
            .collect_vec();
        assert_eq!(winners, vec!["UCF", "UCF", "WPI1"]);
    }

    #[test]
    fn test_parse_unpublished_tables() {
        let document = scraper::Html::parse_document(UNPUBLISHED_PAGE);
        let tables = parse_award_tables(&document).unwrap();
        assert_eq!(tables.len(), 1);

        let awards = extract_awards(&tables);
        assert_eq!(awards.len(), 1);
        assert!(awards[0].qualifies_for_championship);
        assert!(awards[0].team.is_none());
    }

    #[test]
    fn test_page_without_awards_tab() {
        let document = scraper::Html::parse_document("<html><body><p>TBD</p></body></html>");
        assert!(parse_award_tables(&document).unwrap().is_empty());
    }
}
