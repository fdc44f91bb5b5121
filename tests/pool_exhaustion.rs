// tests/pool_exhaustion.rs
//
// Degraded-mode picks must never repeat within the recent-history window and
// must never loop or deadlock once the whole pool has been served.

use std::time::Duration;

use quotidian::sources::SourceChain;
use quotidian::Orchestrator;

fn degraded_orchestrator(history_capacity: usize) -> Orchestrator {
    // No sources at all: every resolve is a pool fallback.
    let chain = SourceChain::new(Vec::new(), Duration::from_millis(100));
    Orchestrator::new(chain, history_capacity).expect("embedded pool")
}

#[tokio::test]
async fn consecutive_fallbacks_avoid_the_recent_window() {
    let cap = 3;
    let orch = degraded_orchestrator(cap);

    let mut ids = Vec::new();
    for _ in 0..12 {
        let r = orch.resolve(None).await;
        assert!(r.degraded);
        ids.push(r.quote.id);
    }

    // Pool (15) is larger than the window (3), so any run of cap+1
    // consecutive picks must be distinct.
    for w in ids.windows(cap + 1) {
        let mut seen = w.to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), cap + 1, "repeat inside recent window: {w:?}");
    }
}

#[tokio::test]
async fn window_larger_than_pool_resets_instead_of_deadlocking() {
    // Window capacity exceeds the pool size, so after one full sweep every
    // pool entry has been seen and the window must reset wholesale.
    let orch = degraded_orchestrator(50);

    let mut ids = Vec::new();
    for _ in 0..40 {
        let r = orch.resolve(None).await;
        assert!(r.degraded);
        ids.push(r.quote.id);
    }

    // First sweep never repeats while unseen entries remain.
    let pool_size = 15;
    let mut first_sweep = ids[..pool_size].to_vec();
    first_sweep.sort();
    first_sweep.dedup();
    assert_eq!(first_sweep.len(), pool_size, "first sweep should cover the pool");
}
