use std::collections::HashMap;
use std::io::Write;

use anyhow::Result;
use csv::WriterBuilder;
use log::debug;
use serde::{Deserialize, Serialize};

use super::index::FilingRecord;
use super::transactions::{FilterChain, TransactionRecord};

/// One transaction enriched with its filing's index metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinedRow {
    pub transaction: TransactionRecord,
    pub filer_name: String,
    pub filing_type: String,
    pub filing_year: i32,
}

/// Final output of the pipeline: transactions joined onto filing metadata,
/// ordered by index position then document order. Read-only once produced.
#[derive(Debug, Default)]
pub struct JoinedDataset {
    rows: Vec<JoinedRow>,
}

/// Inner join of transactions onto their filings by document reference.
///
/// Transactions whose reference has no index row are dropped, as are
/// renamed securities annotated "formerly" (applied uniformly here, after
/// the join).
pub fn join_filings(
    transactions: &[TransactionRecord],
    filings: &[FilingRecord],
) -> JoinedDataset {
    let by_reference: HashMap<&str, &FilingRecord> = filings
        .iter()
        .filter_map(|f| f.document_reference.as_deref().map(|r| (r, f)))
        .collect();

    let chain = FilterChain::post_join();
    let mut rows = Vec::new();

    for transaction in transactions {
        let Some(filing) = by_reference.get(transaction.document_reference.as_str()) else {
            debug!(
                "no index row for {}, dropping transaction",
                transaction.document_reference
            );
            continue;
        };
        if !chain.keeps(transaction) {
            continue;
        }
        rows.push(JoinedRow {
            transaction: transaction.clone(),
            filer_name: filing.filer_name.clone(),
            filing_type: filing.filing_type.clone(),
            filing_year: filing.filing_year,
        });
    }

    JoinedDataset { rows }
}

impl JoinedDataset {
    pub fn rows(&self) -> &[JoinedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the dataset as CSV, one row per transaction.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);

        writer.write_record([
            "document_reference",
            "filer",
            "filing_type",
            "filing_year",
            "name",
            "ticker",
            "lower_limit",
            "upper_limit",
            "average",
            "value_range",
        ])?;

        for row in &self.rows {
            let t = &row.transaction;
            writer.write_record(&[
                t.document_reference.clone(),
                row.filer_name.clone(),
                row.filing_type.clone(),
                row.filing_year.to_string(),
                t.name.clone(),
                t.ticker.clone().unwrap_or_default(),
                t.lower_bound.map(|v| v.to_string()).unwrap_or_default(),
                t.upper_bound.map(|v| v.to_string()).unwrap_or_default(),
                t.midpoint.map(|v| v.to_string()).unwrap_or_default(),
                t.value_range.clone(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clerk::transactions::{normalize_line, RawTransactionLine};
    use std::collections::BTreeMap;

    fn filing(reference: Option<&str>, filer: &str, year: i32) -> FilingRecord {
        FilingRecord {
            document_reference: reference.map(str::to_string),
            filer_name: filer.to_string(),
            filing_type: "PTR Original".to_string(),
            filing_year: year,
            other: BTreeMap::new(),
        }
    }

    fn transaction(reference: &str, name: &str) -> TransactionRecord {
        normalize_line(
            reference,
            &RawTransactionLine {
                name_raw: name.to_string(),
                value_range_raw: "$1,001 - $15,000".to_string(),
            },
        )
    }

    #[test]
    fn join_attaches_filing_metadata() {
        let filings = vec![filing(Some("/a.pdf"), "Doe, John", 2016)];
        let transactions = vec![transaction("/a.pdf", "Apple Inc (AAPL)")];
        let dataset = join_filings(&transactions, &filings);
        assert_eq!(dataset.len(), 1);
        let row = &dataset.rows()[0];
        assert_eq!(row.filer_name, "Doe, John");
        assert_eq!(row.filing_year, 2016);
        assert_eq!(row.transaction.ticker.as_deref(), Some("AAPL"));
    }

    #[test]
    fn join_drops_transactions_without_matching_filing() {
        let filings = vec![filing(Some("/a.pdf"), "Doe, John", 2016)];
        let transactions = vec![transaction("/other.pdf", "Apple Inc (AAPL)")];
        let dataset = join_filings(&transactions, &filings);
        assert!(dataset.is_empty());
    }

    #[test]
    fn renamed_securities_are_dropped_post_join() {
        let filings = vec![filing(Some("/a.pdf"), "Doe, John", 2016)];
        let transactions = vec![
            transaction("/a.pdf", "Apple Inc (AAPL)"),
            transaction("/a.pdf", "XYZ Corp (XYZ (formerly ABC)"),
        ];
        let dataset = join_filings(&transactions, &filings);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.rows()[0].transaction.ticker.as_deref(), Some("AAPL"));
    }

    #[test]
    fn csv_output_has_header_and_one_row_per_transaction() {
        let filings = vec![filing(Some("/a.pdf"), "Doe, John", 2016)];
        let transactions = vec![transaction("/a.pdf", "Apple Inc (AAPL)")];
        let dataset = join_filings(&transactions, &filings);

        let mut buffer = Vec::new();
        dataset.write_csv(&mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("document_reference,filer,filing_type"));
        assert!(lines[1].contains("Apple Inc (AAPL)"));
        assert!(lines[1].contains("8000.5"));
    }
}
