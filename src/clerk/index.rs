use std::collections::BTreeMap;

use log::{debug, warn};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{ClerkConfig, SEARCH_PATH};
use crate::error::ClerkError;
use crate::utils::http;

/// One row of the Clerk's search-result table.
///
/// Rows without a hyperlink carry no `document_reference` and are excluded
/// from the document-fetch stage, but still appear in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingRecord {
    /// Relative path of the filing's PDF on the Clerk's host.
    pub document_reference: Option<String>,
    pub filer_name: String,
    pub filing_type: String,
    pub filing_year: i32,
    /// Remaining index columns, keyed by their `data-label` attribute.
    pub other: BTreeMap<String, String>,
}

/// A table cell normalized once before row assembly: column label, cell
/// text, and the hyperlink target if the cell wraps one.
#[derive(Debug, Clone)]
struct Cell {
    label: String,
    text: String,
    href: Option<String>,
}

/// Queries the Clerk's member search endpoint and returns the raw result
/// page. A non-success status is fatal for the batch.
pub async fn search_filings(
    client: &Client,
    config: &ClerkConfig,
) -> Result<String, ClerkError> {
    let url = Url::parse(&format!("{}{}", config.base_url, SEARCH_PATH))
        .map_err(|e| ClerkError::Parse {
            detail: format!("bad search URL: {}", e),
        })?;

    let mut form: Vec<(&str, String)> = Vec::new();
    if let Some(last_name) = &config.last_name {
        form.push(("LastName", last_name.clone()));
    }

    http::post_form(client, &url, &form, &config.user_agent).await
}

/// Parses the search-result page into filing records, keeping only filings
/// from `year_cutoff` onward. Rows with a missing or unparseable year are
/// dropped, not fatal.
pub fn parse_filing_index(html: &str, year_cutoff: i32) -> Vec<FilingRecord> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();
    let link_selector = Selector::parse("a").unwrap();

    let mut records = Vec::new();

    for row in document.select(&row_selector) {
        let cells: Vec<Cell> = row
            .select(&cell_selector)
            .map(|td| parse_cell(td, &link_selector))
            .collect();

        // The header row carries <th> cells only and yields no <td> matches.
        if cells.is_empty() {
            continue;
        }

        match assemble_row(cells) {
            Ok(record) if record.filing_year >= year_cutoff => records.push(record),
            Ok(record) => debug!(
                "dropping {} filing from {} (before {} cutoff)",
                record.filer_name, record.filing_year, year_cutoff
            ),
            Err(e) => warn!("dropping malformed index row: {}", e),
        }
    }

    records
}

fn parse_cell(td: ElementRef, link_selector: &Selector) -> Cell {
    let label = td
        .value()
        .attr("data-label")
        .unwrap_or_default()
        .to_string();
    let text = td.text().collect::<String>().trim().to_string();
    let href = td
        .select(link_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string);
    Cell { label, text, href }
}

fn assemble_row(cells: Vec<Cell>) -> Result<FilingRecord, ClerkError> {
    let mut document_reference = None;
    let mut filer_name = String::new();
    let mut filing_type = String::new();
    let mut filing_year = None;
    let mut other = BTreeMap::new();

    for cell in cells {
        if cell.href.is_some() {
            document_reference = cell.href.clone();
        }
        match cell.label.as_str() {
            "Name" => filer_name = cell.text,
            "Filing" => filing_type = cell.text,
            "Filing Year" => {
                let year =
                    cell.text
                        .parse::<i32>()
                        .map_err(|e| ClerkError::Parse {
                            detail: format!("filing year '{}': {}", cell.text, e),
                        })?;
                filing_year = Some(year);
            }
            _ => {
                other.insert(cell.label, cell.text);
            }
        }
    }

    let filing_year = filing_year.ok_or_else(|| ClerkError::Parse {
        detail: "index row has no Filing Year cell".to_string(),
    })?;

    Ok(FilingRecord {
        document_reference,
        filer_name,
        filing_type,
        filing_year,
        other,
    })
}
