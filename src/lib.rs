//! Random SoundCloud track discovery.
//!
//! Guesses `on.soundcloud.com` short links until one redirects to a track
//! page, scrapes the track's metadata, records it in a JSON lines log and
//! hands back an embeddable player.

use axum::Router;
use rand::Rng;
use tracing::error;

pub mod api;
pub mod config;
pub mod embed;
pub mod error;
pub mod finding;
pub mod resolver;
pub mod scrape;
pub mod shortlink;

use crate::config::Config;
use crate::error::ResolveError;
use crate::finding::{Finding, FindingLog};
use crate::resolver::Resolver;

/// Application state shared across HTTP handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub findings: FindingLog,
}

impl AppState {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        Ok(Self {
            resolver: Resolver::new(config)?,
            findings: FindingLog::new(config.findings_file.clone()),
        })
    }

    /// Find a playable track and record it. Logging the finding never fails
    /// the search.
    pub async fn discover<R: Rng + Send>(&self, rng: &mut R) -> Result<Finding, ResolveError> {
        let finding = self.resolver.find(rng).await?;

        let findings = self.findings.clone();
        let record = finding.clone();
        if let Err(e) = tokio::task::spawn_blocking(move || findings.append(&record)).await {
            error!("Finding log task failed: {e}");
        }
        Ok(finding)
    }
}

pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::serve_index))
        .route("/random", get(api::random))
        .with_state(state)
}
