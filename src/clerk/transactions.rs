use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Shape of a PTR transaction line: a security name confined to one line,
/// a two-character asset-type code, then the disclosed value band as two
/// dollar amounts with arbitrary text between them. The band may wrap onto
/// following lines.
static TRANSACTION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\n([^\n]*)\s\w{2}\s(\$[0-9,]+.*?\$[0-9,]+)").unwrap());

/// `Apple Inc (AAPL)` — the parenthesized group after the name is the ticker.
static TICKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*?\s\((.*?)\)").unwrap());

static DOLLAR_AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([0-9]+)").unwrap());

/// One structural match against a document's text, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransactionLine {
    pub name_raw: String,
    pub value_range_raw: String,
}

/// A normalized transaction, keyed back to its filing by
/// `document_reference`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub document_reference: String,
    pub name: String,
    pub ticker: Option<String>,
    pub lower_bound: Option<i64>,
    pub upper_bound: Option<i64>,
    pub midpoint: Option<f64>,
    /// The value band with separators stripped. When the band did not parse
    /// into two amounts the bounds are unset and this is all that remains
    /// for inspection.
    pub value_range: String,
}

/// Scans extracted PDF text for transaction-shaped lines, in document order.
///
/// This is a best-effort structural match against a semi-structured layout;
/// missed rows and mis-captured header rows both happen, and the latter are
/// filtered downstream rather than here.
pub fn extract_lines(text: &str) -> Vec<RawTransactionLine> {
    TRANSACTION_LINE
        .captures_iter(text)
        .map(|caps| RawTransactionLine {
            name_raw: caps[1].trim().to_string(),
            value_range_raw: caps[2].to_string(),
        })
        .collect()
}

/// Normalizes one raw line. Pure: no state, no failure — a ticker that does
/// not parse is simply absent, and so is an unparseable value band.
pub fn normalize_line(document_reference: &str, line: &RawTransactionLine) -> TransactionRecord {
    let (lower_bound, upper_bound, midpoint, value_range) =
        parse_value_range(&line.value_range_raw);
    TransactionRecord {
        document_reference: document_reference.to_string(),
        name: line.name_raw.clone(),
        ticker: parse_ticker(&line.name_raw),
        lower_bound,
        upper_bound,
        midpoint,
        value_range,
    }
}

fn parse_ticker(name: &str) -> Option<String> {
    TICKER.captures(name).map(|caps| caps[1].to_string())
}

/// Disclosed bands read `$1,001 - $15,000`. Thousands separators and the
/// range dash are stripped before the amounts are pulled out; anything less
/// than two amounts is an unparseable band and leaves the bounds unset.
fn parse_value_range(raw: &str) -> (Option<i64>, Option<i64>, Option<f64>, String) {
    let stripped = raw.replace(',', "").replace('-', "");
    let amounts: Vec<i64> = DOLLAR_AMOUNT
        .captures_iter(&stripped)
        .filter_map(|caps| caps[1].parse().ok())
        .collect();
    let retained = stripped.replace('$', "");

    if let [lower, upper, ..] = amounts.as_slice() {
        let midpoint = (*lower + *upper) as f64 / 2.0;
        (Some(*lower), Some(*upper), Some(midpoint), retained)
    } else {
        (None, None, None, retained)
    }
}

/// Noise filters applied to normalized records. Each rule names one known
/// noise shape; a record is kept only if no rule matches it. New noise
/// patterns get a new rule here, not a change to the extraction regex.
pub struct FilterChain {
    rules: Vec<(&'static str, fn(&TransactionRecord) -> bool)>,
}

impl FilterChain {
    pub fn new() -> Self {
        FilterChain { rules: Vec::new() }
    }

    pub fn with_rule(
        mut self,
        name: &'static str,
        rule: fn(&TransactionRecord) -> bool,
    ) -> Self {
        self.rules.push((name, rule));
        self
    }

    /// Rules applied while tabulating a single document.
    pub fn tabulation(tickers_only: bool) -> Self {
        let chain = FilterChain::new().with_rule("header-row", is_header_row);
        if tickers_only {
            chain.with_rule("no-ticker", has_no_ticker)
        } else {
            chain
        }
    }

    /// Rules applied after the join with filing metadata.
    pub fn post_join() -> Self {
        FilterChain::new().with_rule("renamed-security", is_renamed_security)
    }

    pub fn keeps(&self, record: &TransactionRecord) -> bool {
        for (name, rule) in &self.rules {
            if rule(record) {
                debug!("excluding '{}' ({})", record.name, name);
                return false;
            }
        }
        true
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

// The form's column-header rows match the line pattern too; their captured
// "name" contains the word "description".
fn is_header_row(record: &TransactionRecord) -> bool {
    record.name.to_lowercase().contains("description")
}

fn has_no_ticker(record: &TransactionRecord) -> bool {
    record.ticker.is_none()
}

// Renamed securities are annotated "(formerly ...)" and are noise, not a
// real holding.
fn is_renamed_security(record: &TransactionRecord) -> bool {
    record
        .ticker
        .as_ref()
        .is_some_and(|t| t.to_lowercase().contains("formerly"))
}

/// Extracts and normalizes every transaction line in one document's text.
/// At most one record comes out per matched line, in document order.
pub fn tabulate_text(
    document_reference: &str,
    text: &str,
    tickers_only: bool,
) -> Vec<TransactionRecord> {
    let chain = FilterChain::tabulation(tickers_only);
    extract_lines(text)
        .iter()
        .map(|line| normalize_line(document_reference, line))
        .filter(|record| chain.keeps(record))
        .collect()
}
