pub mod clerk;
pub mod config;
pub mod error;
pub mod utils;

// Re-exports
pub use clerk::{collect_filings, Collection, FetchStatus, FilingOutcome};
pub use config::ClerkConfig;
pub use error::ClerkError;
