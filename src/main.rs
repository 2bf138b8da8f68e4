use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use log::info;
use reqwest::Client;
use structopt::StructOpt;

use house_disclosures::{collect_filings, ClerkConfig, FetchStatus};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "house-disclosures",
    about = "Extract investment transactions from House financial-disclosure PTR filings"
)]
struct Opt {
    /// Member last name to search for; omit to fetch every member.
    #[structopt(long)]
    last_name: Option<String>,

    /// Keep only filings from this year onward.
    #[structopt(long, default_value = "2014")]
    year_cutoff: i32,

    /// Keep every transaction, not just those with a parsed ticker.
    #[structopt(long)]
    all_transactions: bool,

    /// Pause between document fetches, in milliseconds.
    #[structopt(long, default_value = "1000")]
    fetch_delay_ms: u64,

    /// Write the joined dataset to this CSV file instead of stdout.
    #[structopt(long, parse(from_os_str))]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger.
    env_logger::init();

    let opt = Opt::from_args();
    let config = ClerkConfig {
        last_name: opt.last_name,
        year_cutoff: opt.year_cutoff,
        tickers_only: !opt.all_transactions,
        fetch_delay: Duration::from_millis(opt.fetch_delay_ms),
        ..ClerkConfig::default()
    };

    let client = Client::new();
    let collection = collect_filings(&client, &config).await?;

    for outcome in &collection.outcomes {
        if outcome.status != FetchStatus::Success {
            let reference = if outcome.document_reference.is_empty() {
                "<no document link>"
            } else {
                outcome.document_reference.as_str()
            };
            eprintln!(
                "skipped {}: {}",
                reference,
                outcome.error.as_deref().unwrap_or("unknown")
            );
        }
    }
    info!(
        "{} joined transactions across {} filings",
        collection.dataset.len(),
        collection.outcomes.len()
    );

    match opt.output {
        Some(path) => {
            collection.dataset.write_csv(File::create(&path)?)?;
            println!(
                "Wrote {} rows to {}",
                collection.dataset.len(),
                path.display()
            );
        }
        None => collection.dataset.write_csv(std::io::stdout())?,
    }

    Ok(())
}
