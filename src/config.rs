use std::time::Duration;

// Hardcoded values
pub const CLERK_BASE_URL: &str = "https://disclosures-clerk.house.gov";
pub const SEARCH_PATH: &str =
    "/PublicDisclosure/FinancialDisclosure/ViewMemberSearchResult";
pub const DEFAULT_USER_AGENT: &str = "software@example.com";

/// Electronic filing began in 2014; earlier index rows reference scanned
/// paper forms with no extractable text layer.
pub const DEFAULT_YEAR_CUTOFF: i32 = 2014;

#[derive(Clone, Debug)]
pub struct ClerkConfig {
    pub base_url: String,
    /// Member last name to search for. `None` fetches every member.
    pub last_name: Option<String>,
    /// Keep only filings from this year onward.
    pub year_cutoff: i32,
    /// Keep only transactions with a parsed ticker.
    pub tickers_only: bool,
    /// Pause honored before each per-document fetch.
    pub fetch_delay: Duration,
    pub user_agent: String,
}

impl Default for ClerkConfig {
    fn default() -> Self {
        ClerkConfig {
            base_url: CLERK_BASE_URL.to_string(),
            last_name: None,
            year_cutoff: DEFAULT_YEAR_CUTOFF,
            tickers_only: true,
            fetch_delay: Duration::from_secs(1),
            user_agent: std::env::var("USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        }
    }
}

impl ClerkConfig {
    pub fn for_member(last_name: impl Into<String>) -> Self {
        ClerkConfig {
            last_name: Some(last_name.into()),
            ..ClerkConfig::default()
        }
    }
}
