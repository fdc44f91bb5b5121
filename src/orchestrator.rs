// src/orchestrator.rs
// Dedup & fallback policy wrapped around the source chain. The only surface
// callers see: `resolve` and `search`, both of which always hand back a quote
// (or an explicit no-matches signal for search) and never a raw source error.

use std::sync::Mutex;

use metrics::{counter, histogram};
use rand::seq::IndexedRandom;

use crate::error::PoolConfigError;
use crate::history::RecentHistory;
use crate::pool::LocalPool;
use crate::quote::Quote;
use crate::sources::{ChainOutcome, Constraint, SourceChain};

/// A quote plus how it was obtained.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub quote: Quote,
    /// Served from the embedded pool because no live source produced a
    /// usable candidate. Messaging only; callers must not branch on it.
    pub degraded: bool,
    /// The requested narrowing matched nothing, so an unfiltered pick was
    /// substituted.
    pub filter_relaxed: bool,
}

#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found(Resolved),
    NoMatches,
}

pub struct Orchestrator {
    chain: SourceChain,
    pool: LocalPool,
    // Mutated only after a candidate is fully accepted and never while a
    // request is suspended on the network, so an abandoned call leaves no
    // partial state behind.
    history: Mutex<RecentHistory>,
}

impl Orchestrator {
    pub fn new(chain: SourceChain, history_capacity: usize) -> Result<Self, PoolConfigError> {
        Ok(Self {
            chain,
            pool: LocalPool::embedded()?,
            history: Mutex::new(RecentHistory::with_capacity(history_capacity)),
        })
    }

    /// Produce one quote, optionally narrowed by a tag or free-text term.
    /// Live sources are tried in priority order with recent repeats skipped;
    /// when everything fails the embedded pool steps in.
    pub async fn resolve(&self, constraint: Option<Constraint>) -> Resolved {
        let t0 = std::time::Instant::now();

        let outcome = self
            .chain
            .fetch(constraint.as_ref(), |candidate| {
                !self
                    .history
                    .lock()
                    .expect("history mutex poisoned")
                    .contains(&candidate.id)
            })
            .await;

        let resolved = match outcome {
            Ok(ChainOutcome::Fresh(quote)) => {
                self.remember(&quote.id);
                Resolved {
                    quote,
                    degraded: false,
                    filter_relaxed: false,
                }
            }
            Ok(ChainOutcome::Duplicate(quote)) => {
                // Every reachable candidate was recently served; a repeat
                // from a live source still beats a canned one.
                tracing::info!(id = %quote.id, "all candidates recently served, repeating one");
                self.remember(&quote.id);
                Resolved {
                    quote,
                    degraded: false,
                    filter_relaxed: false,
                }
            }
            Err(exhausted) => {
                tracing::warn!(
                    attempts = exhausted.attempts,
                    duplicates = exhausted.duplicates,
                    error = %exhausted,
                    "source chain exhausted, serving from local pool"
                );
                counter!("fallback_total").increment(1);
                self.pool_pick(constraint.as_ref())
            }
        };

        histogram!("resolve_duration_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        resolved
    }

    /// Keyword search. One server-side attempt against the top-ranked source
    /// when it has the capability, otherwise a scan of the embedded pool.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::Found(self.resolve(None).await);
        }

        match self.chain.search_top(query).await {
            Some(Ok(quote)) => {
                return SearchOutcome::Found(Resolved {
                    quote,
                    degraded: false,
                    filter_relaxed: false,
                });
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "server-side search failed, scanning local pool");
            }
            None => {}
        }

        let hits = self.pool.matching(query);
        match hits.choose(&mut rand::rng()) {
            Some(q) => SearchOutcome::Found(Resolved {
                quote: (*q).clone(),
                degraded: true,
                filter_relaxed: false,
            }),
            None => SearchOutcome::NoMatches,
        }
    }

    fn remember(&self, id: &str) {
        self.history
            .lock()
            .expect("history mutex poisoned")
            .insert(id);
    }

    /// Uniform random pick from the embedded pool, preferring entries not in
    /// recent history. When the whole reachable pool has been served, the
    /// window is reset rather than looping or failing.
    fn pool_pick(&self, constraint: Option<&Constraint>) -> Resolved {
        let mut rng = rand::rng();

        let (candidates, filter_relaxed) = match constraint {
            Some(c) => {
                let hits = self.pool.matching(c.needle());
                if hits.is_empty() {
                    tracing::info!(needle = c.needle(), "no pool match for constraint, relaxing");
                    (self.pool.all().iter().collect::<Vec<_>>(), true)
                } else {
                    (hits, false)
                }
            }
            None => (self.pool.all().iter().collect::<Vec<_>>(), false),
        };

        let mut history = self.history.lock().expect("history mutex poisoned");
        let unseen: Vec<&&Quote> = candidates
            .iter()
            .filter(|q| !history.contains(&q.id))
            .collect();

        let quote = if let Some(q) = unseen.choose(&mut rng) {
            (***q).clone()
        } else {
            history.reset();
            // candidates is non-empty: the pool itself is never empty and
            // relaxation guarantees at least the full pool
            (**candidates.choose(&mut rng).expect("non-empty pool")).clone()
        };
        history.insert(&quote.id);

        Resolved {
            quote,
            degraded: true,
            filter_relaxed,
        }
    }
}
