use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::scrape::Track;

/// A resolved and scraped track, as written to the findings log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub url: String,
    pub artist: String,
    pub title: String,
    pub tags: String,
    pub description: String,
}

impl Finding {
    pub fn new(url: impl Into<String>, track: Track) -> Self {
        Self {
            url: url.into(),
            artist: track.artist,
            title: track.title,
            tags: track.tags,
            description: track.description,
        }
    }

    /// Removed tracks still resolve but come back with a blank artist or
    /// title. Those are not worth keeping.
    pub fn is_playable(&self) -> bool {
        !is_blank(&self.artist) && !is_blank(&self.title)
    }

    /// Serialize as a single JSON line, newlines in values replaced by spaces.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        let flat = Self {
            url: flatten(&self.url),
            artist: flatten(&self.artist),
            title: flatten(&self.title),
            tags: flatten(&self.tags),
            description: flatten(&self.description),
        };
        let mut line = serde_json::to_string(&flat)?;
        line.push('\n');
        Ok(line)
    }
}

// Upstream marks removed tracks with a `\n` value, either as a real newline
// or as the escaped two-character form
fn is_blank(value: &str) -> bool {
    value.trim().is_empty() || value.trim() == "\\n"
}

fn flatten(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// Append-only JSON lines file of findings.
#[derive(Debug, Clone)]
pub struct FindingLog {
    path: PathBuf,
}

impl FindingLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. Failures are logged and the record is dropped.
    pub fn append(&self, finding: &Finding) {
        if let Err(e) = self.try_append(finding) {
            error!(
                path = %self.path.display(),
                url = %finding.url,
                "Error appending finding: {e}"
            );
        }
    }

    fn try_append(&self, finding: &Finding) -> anyhow::Result<()> {
        let line = finding.to_json_line()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        // Single write so concurrent appenders don't interleave
        file.write_all(line.as_bytes())?;
        debug!(path = %self.path.display(), url = %finding.url, "saved finding");
        Ok(())
    }
}
