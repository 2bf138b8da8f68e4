pub mod dataset;
pub mod index;
pub mod pdf;
pub mod transactions;

use log::{info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ClerkConfig;
use crate::error::ClerkError;
use crate::utils::http;
use crate::utils::throttle::Throttle;

use self::dataset::{join_filings, JoinedDataset};
use self::index::{parse_filing_index, search_filings};
use self::transactions::{tabulate_text, TransactionRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchStatus {
    Success,
    Failed,
    Skipped,
}

/// Per-filing record of how the fetch-extract-tabulate cycle went. The
/// joined dataset silently omits failed filings; this log is where the
/// failures remain visible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingOutcome {
    /// Empty when the index row carried no document link.
    pub document_reference: String,
    pub status: FetchStatus,
    pub transactions: usize,
    pub error: Option<String>,
}

/// Result of one full run: the joined dataset plus the per-filing log.
#[derive(Debug)]
pub struct Collection {
    pub dataset: JoinedDataset,
    pub outcomes: Vec<FilingOutcome>,
}

/// Runs the whole pipeline: search the Clerk's index, then for each filing
/// in index order fetch its PDF, extract the text, and tabulate the
/// transactions; finally join everything back onto the index metadata.
///
/// A failure on one filing's fetch or extraction is recorded and that
/// filing skipped; only an index-fetch failure aborts the batch.
pub async fn collect_filings(
    client: &Client,
    config: &ClerkConfig,
) -> Result<Collection, ClerkError> {
    let html = search_filings(client, config).await?;
    let filings = parse_filing_index(&html, config.year_cutoff);
    info!(
        "index returned {} filings from {} onward",
        filings.len(),
        config.year_cutoff
    );

    let throttle = Throttle::new(config.fetch_delay);
    let mut transactions: Vec<TransactionRecord> = Vec::new();
    let mut outcomes = Vec::new();

    for filing in &filings {
        let Some(reference) = filing.document_reference.as_deref() else {
            outcomes.push(FilingOutcome {
                document_reference: String::new(),
                status: FetchStatus::Skipped,
                transactions: 0,
                error: Some("index row has no document link".to_string()),
            });
            continue;
        };

        throttle.wait().await;

        match fetch_and_tabulate(client, config, reference).await {
            Ok(records) => {
                info!("{}: {} transactions", reference, records.len());
                outcomes.push(FilingOutcome {
                    document_reference: reference.to_string(),
                    status: FetchStatus::Success,
                    transactions: records.len(),
                    error: None,
                });
                transactions.extend(records);
            }
            Err(e) => {
                warn!("skipping filing {}: {}", reference, e);
                outcomes.push(FilingOutcome {
                    document_reference: reference.to_string(),
                    status: FetchStatus::Failed,
                    transactions: 0,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let dataset = join_filings(&transactions, &filings);
    Ok(Collection { dataset, outcomes })
}

async fn fetch_and_tabulate(
    client: &Client,
    config: &ClerkConfig,
    reference: &str,
) -> Result<Vec<TransactionRecord>, ClerkError> {
    let url = Url::parse(&format!("{}{}", config.base_url, reference)).map_err(|e| {
        ClerkError::Parse {
            detail: format!("bad document reference '{}': {}", reference, e),
        }
    })?;
    let bytes = http::fetch_bytes(client, &url, &config.user_agent).await?;
    let text = pdf::extract_text(&bytes)?;
    Ok(tabulate_text(reference, &text, config.tickers_only))
}
