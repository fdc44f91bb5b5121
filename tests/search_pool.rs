// tests/search_pool.rs
//
// Keyword search policy: one server-side attempt when the top source has the
// capability, otherwise a case-insensitive scan of the embedded pool.

use std::time::Duration;

use async_trait::async_trait;
use quotidian::error::SourceError;
use quotidian::sources::{Constraint, QuoteSource, SourceChain};
use quotidian::{Orchestrator, Quote, SearchOutcome};

struct SearchableSource;

#[async_trait]
impl QuoteSource for SearchableSource {
    fn name(&self) -> &'static str {
        "searchable"
    }
    async fn fetch_random(&self, _c: Option<&Constraint>) -> Result<Quote, SourceError> {
        Err(SourceError::Status(500))
    }
    fn supports_search(&self) -> bool {
        true
    }
    async fn search(&self, query: &str) -> Result<Quote, SourceError> {
        Ok(Quote {
            id: "srv-1".to_string(),
            content: format!("Server-side hit for {query}"),
            author: "Upstream".to_string(),
            tags: Vec::new(),
        })
    }
}

fn pool_only() -> Orchestrator {
    let chain = SourceChain::new(Vec::new(), Duration::from_millis(100));
    Orchestrator::new(chain, 9).expect("embedded pool")
}

#[tokio::test]
async fn pool_search_returns_only_matching_quotes() {
    let orch = pool_only();
    for _ in 0..8 {
        match orch.search("wisdom").await {
            SearchOutcome::Found(r) => {
                assert!(r.degraded);
                assert!(r.quote.matches("wisdom"), "unrelated hit: {:?}", r.quote);
            }
            SearchOutcome::NoMatches => panic!("'wisdom' exists in the pool"),
        }
    }
}

#[tokio::test]
async fn pool_search_with_no_hits_signals_no_matches() {
    let orch = pool_only();
    match orch.search("zzz-no-match").await {
        SearchOutcome::NoMatches => {}
        SearchOutcome::Found(r) => panic!("expected no matches, got {:?}", r.quote),
    }
}

#[tokio::test]
async fn blank_query_degenerates_to_a_random_quote() {
    let orch = pool_only();
    match orch.search("   ").await {
        SearchOutcome::Found(r) => assert!(!r.quote.content.is_empty()),
        SearchOutcome::NoMatches => panic!("blank query should fall back to random"),
    }
}

#[tokio::test]
async fn server_side_search_wins_when_top_source_supports_it() {
    let chain = SourceChain::new(
        vec![Box::new(SearchableSource) as Box<dyn QuoteSource>],
        Duration::from_millis(100),
    );
    let orch = Orchestrator::new(chain, 9).unwrap();

    match orch.search("courage").await {
        SearchOutcome::Found(r) => {
            assert_eq!(r.quote.id, "srv-1");
            assert!(!r.degraded);
        }
        SearchOutcome::NoMatches => panic!("server-side search should have answered"),
    }
}

#[tokio::test]
async fn author_names_are_searchable_in_the_pool() {
    let orch = pool_only();
    match orch.search("churchill").await {
        SearchOutcome::Found(r) => {
            assert!(r.quote.author.to_lowercase().contains("churchill"));
        }
        SearchOutcome::NoMatches => panic!("pool has a Churchill quote"),
    }
}
