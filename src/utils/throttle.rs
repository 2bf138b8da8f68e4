use std::time::Duration;

/// Fixed inter-request pause for the Clerk's site.
///
/// The site publishes no formal rate limit; one request per second keeps the
/// scraper polite. The pause is honored before every document fetch,
/// uniformly, regardless of document size.
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Throttle { delay }
    }

    pub async fn wait(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
