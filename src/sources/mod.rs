// src/sources/mod.rs
pub mod ninjas;
pub mod quotable;
pub mod zenquotes;

use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use tokio::time::timeout;

use crate::error::{ChainExhausted, SourceError};
use crate::quote::Quote;

/// Optional narrowing applied to a fetch: a topic tag or a free-text term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Tag(String),
    Query(String),
}

impl Constraint {
    /// The raw text used for degraded-mode substring filtering.
    pub fn needle(&self) -> &str {
        match self {
            Constraint::Tag(t) => t,
            Constraint::Query(q) => q,
        }
    }
}

/// One upstream quote provider. Each implementation owns its transport and
/// its normalization from the provider's native JSON shape into [`Quote`].
#[async_trait]
pub trait QuoteSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch one random quote, honoring the constraint when the upstream
    /// can. A constraint the upstream cannot express is a typed rejection
    /// (`UnsupportedConstraint`), letting the chain move on.
    async fn fetch_random(&self, constraint: Option<&Constraint>) -> Result<Quote, SourceError>;

    /// Whether the provider exposes server-side keyword search.
    fn supports_search(&self) -> bool {
        false
    }

    async fn search(&self, _query: &str) -> Result<Quote, SourceError> {
        Err(SourceError::UnsupportedConstraint)
    }
}

/// Outcome of one pass over the chain.
#[derive(Debug)]
pub enum ChainOutcome {
    /// First candidate the acceptance check let through.
    Fresh(Quote),
    /// Every candidate collided with recent history; the last one is served
    /// anyway rather than looping or degrading past a live source.
    Duplicate(Quote),
}

/// Priority-ordered list of sources, tried sequentially with one bounded
/// attempt each. Adding or reordering providers is a configuration edit;
/// nothing in here branches on a concrete provider.
pub struct SourceChain {
    sources: Vec<Box<dyn QuoteSource>>,
    attempt_timeout: Duration,
}

impl SourceChain {
    pub fn new(sources: Vec<Box<dyn QuoteSource>>, attempt_timeout: Duration) -> Self {
        Self {
            sources,
            attempt_timeout,
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Try sources in priority order, short-circuiting on the first
    /// candidate `accept` lets through. Candidates rejected by `accept` are
    /// remembered: when a full pass yields only rejections, the last one is
    /// returned as [`ChainOutcome::Duplicate`].
    pub async fn fetch<F>(
        &self,
        constraint: Option<&Constraint>,
        mut accept: F,
    ) -> Result<ChainOutcome, ChainExhausted>
    where
        F: FnMut(&Quote) -> bool + Send,
    {
        let mut attempts = 0usize;
        let mut duplicates = 0usize;
        let mut last_err: Option<SourceError> = None;
        let mut last_dup: Option<Quote> = None;

        for src in &self.sources {
            attempts += 1;
            counter!("source_attempts_total", "source" => src.name()).increment(1);

            let res = match timeout(self.attempt_timeout, src.fetch_random(constraint)).await {
                Ok(r) => r,
                Err(_) => Err(SourceError::Timeout(self.attempt_timeout)),
            };

            match res {
                Ok(candidate) => {
                    if accept(&candidate) {
                        tracing::debug!(source = src.name(), id = %candidate.id, "candidate accepted");
                        return Ok(ChainOutcome::Fresh(candidate));
                    }
                    duplicates += 1;
                    counter!("dedup_rejects_total", "source" => src.name()).increment(1);
                    tracing::debug!(
                        source = src.name(),
                        id = %candidate.id,
                        "candidate recently served, trying next source"
                    );
                    last_dup = Some(candidate);
                }
                Err(e) => {
                    counter!("source_errors_total", "source" => src.name()).increment(1);
                    tracing::warn!(source = src.name(), error = %e, "source attempt failed");
                    last_err = Some(e);
                }
            }
        }

        if let Some(q) = last_dup {
            return Ok(ChainOutcome::Duplicate(q));
        }
        Err(ChainExhausted {
            attempts,
            duplicates,
            last: last_err,
        })
    }

    /// One server-side search attempt against the top-ranked source, when it
    /// has that capability. `None` means the caller should scan the local
    /// pool instead.
    pub async fn search_top(&self, query: &str) -> Option<Result<Quote, SourceError>> {
        let top = self.sources.first()?;
        if !top.supports_search() {
            return None;
        }
        counter!("source_attempts_total", "source" => top.name()).increment(1);
        match timeout(self.attempt_timeout, top.search(query)).await {
            Ok(r) => Some(r),
            Err(_) => Some(Err(SourceError::Timeout(self.attempt_timeout))),
        }
    }
}

/// Assemble the chain from configuration, in configured priority order.
#[cfg(feature = "source-http")]
pub fn build_chain(cfg: &crate::config::AppConfig) -> SourceChain {
    use crate::config::SourceKind;

    let mut sources: Vec<Box<dyn QuoteSource>> = Vec::new();
    for sc in cfg.sources.iter().filter(|s| s.enabled) {
        let base = cfg.resolved_base(sc);
        match sc.kind {
            SourceKind::Quotable => {
                sources.push(Box::new(quotable::QuotableSource::from_base(base)))
            }
            SourceKind::Zenquotes => {
                sources.push(Box::new(zenquotes::ZenQuotesSource::from_base(base)))
            }
            SourceKind::Ninjas => sources.push(Box::new(ninjas::NinjasSource::from_base(base))),
        }
    }
    SourceChain::new(
        sources,
        Duration::from_millis(cfg.attempt_timeout_ms),
    )
}

#[cfg(not(feature = "source-http"))]
pub fn build_chain(_cfg: &crate::config::AppConfig) -> SourceChain {
    panic!("build_chain called without feature `source-http`");
}
