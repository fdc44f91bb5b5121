// src/error.rs
// Typed failure taxonomy for the source chain. Everything here is recovered
// inside the orchestrator; callers only ever see a Quote plus a degraded flag.

use std::time::Duration;

use thiserror::Error;

/// One upstream attempt failed. The chain records it and moves on; a single
/// `fetch` call never retries the same source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider throttled the request")]
    Throttled,

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("well-formed but empty result set")]
    Empty,

    #[error("constraint not supported by this source")]
    UnsupportedConstraint,
}

/// Every source failed or produced only recent duplicates with no override
/// available. Swallowed by the fallback policy; never surfaced to the UI.
#[derive(Debug, Error)]
#[error("source chain exhausted after {attempts} attempts ({duplicates} duplicate candidates)")]
pub struct ChainExhausted {
    pub attempts: usize,
    pub duplicates: usize,
    #[source]
    pub last: Option<SourceError>,
}

/// The embedded local pool is empty. A configuration defect, fatal at
/// startup; the running orchestrator relies on the pool being non-empty.
#[derive(Debug, Error)]
#[error("local quote pool is empty")]
pub struct PoolConfigError;
