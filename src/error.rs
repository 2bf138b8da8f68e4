use thiserror::Error;

/// Failure modes of the disclosure pipeline.
///
/// A `Fetch` failure on the index request is fatal for the whole batch. A
/// `Fetch` or `Extraction` failure on a single document is recorded in the
/// run's outcome log and that filing is skipped, so partial results from the
/// other filings survive. `Parse` failures drop the offending row only.
#[derive(Debug, Error)]
pub enum ClerkError {
    /// Network failure or non-success HTTP status.
    #[error("request to '{url}' failed: {detail}")]
    Fetch { url: String, detail: String },

    /// The text extractor could not read the PDF bytes.
    #[error("text extraction failed: {detail}")]
    Extraction { detail: String },

    /// A year or numeric field could not be parsed.
    #[error("parse failure: {detail}")]
    Parse { detail: String },
}
