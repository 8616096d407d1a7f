use std::time::Duration;

use thiserror::Error;

/// Why a search gave up without a usable track.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no playable track after {0} attempts")]
    AttemptsExhausted(u64),
    #[error("no playable track within {0:?}")]
    DeadlineElapsed(Duration),
}
