use std::time::{Duration, Instant};

use rand::Rng;
use reqwest::{Client, StatusCode, header, redirect};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::ResolveError;
use crate::finding::Finding;
use crate::scrape;
use crate::shortlink;

/// Attempt count of one search, reported at most once per `REPORT_EVERY`.
struct Progress {
    attempts: u64,
    started: Instant,
    last_report: Instant,
}

const REPORT_EVERY: Duration = Duration::from_secs(1);

impl Progress {
    fn new(now: Instant) -> Self {
        Self {
            attempts: 0,
            started: now,
            last_report: now,
        }
    }

    /// Count an attempt. True when it is time to log throughput again.
    fn record(&mut self, now: Instant) -> bool {
        self.attempts += 1;
        if now.saturating_duration_since(self.last_report) < REPORT_EVERY {
            return false;
        }
        self.last_report = now;
        true
    }

    /// Whole attempts per second since the search began, 0 in the first second.
    fn per_second(&self, now: Instant) -> u64 {
        match now.saturating_duration_since(self.started).as_secs() {
            0 => 0,
            secs => self.attempts / secs,
        }
    }
}

/// Guesses short links until one resolves to a playable track.
#[derive(Debug, Clone)]
pub struct Resolver {
    client: Client,
    page_client: Client,
    base_url: String,
    id_length: usize,
    max_attempts: Option<u64>,
    deadline: Option<Duration>,
}

impl Resolver {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        // Redirects must stay visible, the Location header is the result
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(config.request_timeout())
            .build()?;
        // Track pages may move, follow them like a browser would
        let page_client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            page_client,
            base_url: config.base_url.clone(),
            id_length: config.id_length,
            max_attempts: config.max_attempts,
            deadline: config.deadline(),
        })
    }

    /// Search until a playable track turns up or a configured bound is hit.
    /// Without bounds this only returns on success; drop the future to stop it.
    pub async fn find<R: Rng + Send>(&self, rng: &mut R) -> Result<Finding, ResolveError> {
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.search(rng))
                .await
                .map_err(|_| ResolveError::DeadlineElapsed(deadline))?,
            None => self.search(rng).await,
        }
    }

    async fn search<R: Rng + Send>(&self, rng: &mut R) -> Result<Finding, ResolveError> {
        let mut progress = Progress::new(Instant::now());

        loop {
            if let Some(max) = self.max_attempts {
                if progress.attempts >= max {
                    return Err(ResolveError::AttemptsExhausted(max));
                }
            }

            let id = shortlink::random_id(rng, self.id_length);
            let url = shortlink::candidate_url(&self.base_url, &id);
            let now = Instant::now();
            if progress.record(now) {
                info!(
                    attempts = progress.attempts,
                    per_second = progress.per_second(now),
                    "still searching"
                );
            }
            debug!(%url, "trying");

            let target = match self.probe(&url).await {
                Ok(Some(target)) => target,
                Ok(None) => continue,
                Err(e) => {
                    warn!(%url, "Error fetching URL: {e}");
                    continue;
                }
            };
            info!(url = %target, attempts = progress.attempts, "found a hit");

            let html = self.fetch_html(&target).await;
            let finding = Finding::new(target, scrape::scrape_track(&html));
            if !finding.is_playable() {
                info!(url = %finding.url, "blank track data, track probably removed");
                continue;
            }
            return Ok(finding);
        }
    }

    /// The redirect target of `url`, if it answered with one.
    async fn probe(&self, url: &str) -> reqwest::Result<Option<String>> {
        let response = self.client.get(url).send().await?;
        if response.status() != StatusCode::FOUND {
            return Ok(None);
        }

        let target = response
            .headers()
            .get(header::LOCATION)
            .and_then(|location| location.to_str().ok())
            .and_then(shortlink::redirect_target)
            .map(str::to_owned);
        Ok(target)
    }

    /// Body of the track page, or an empty string if it couldn't be read.
    async fn fetch_html(&self, url: &str) -> String {
        let body = match self.page_client.get(url).send().await {
            Ok(response) => response.text().await,
            Err(e) => Err(e),
        };
        body.unwrap_or_else(|e| {
            warn!(%url, "Error fetching track page: {e}");
            String::new()
        })
    }
}
