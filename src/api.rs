// src/api.rs
// HTTP surface for UI clients. Two entry points plus health; every quote
// response is a 200 with the degraded flag carrying the only failure signal.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::orchestrator::{Orchestrator, Resolved, SearchOutcome};
use crate::quote::Quote;
use crate::sources::Constraint;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/quote", get(quote))
        .route("/api/search", get(search))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct QuoteParams {
    tag: Option<String>,
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
struct QuoteResponse {
    #[serde(flatten)]
    quote: Quote,
    degraded: bool,
    filter_relaxed: bool,
}

impl From<Resolved> for QuoteResponse {
    fn from(r: Resolved) -> Self {
        Self {
            quote: r.quote,
            degraded: r.degraded,
            filter_relaxed: r.filter_relaxed,
        }
    }
}

#[derive(Serialize)]
struct SearchResponse {
    #[serde(flatten)]
    quote: Option<QuoteResponse>,
    no_matches: bool,
}

async fn quote(
    State(state): State<AppState>,
    Query(params): Query<QuoteParams>,
) -> Json<QuoteResponse> {
    let constraint = params
        .tag
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .map(Constraint::Tag);
    let resolved = state.orchestrator.resolve(constraint).await;
    Json(resolved.into())
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    match state.orchestrator.search(&params.q).await {
        SearchOutcome::Found(resolved) => Json(SearchResponse {
            quote: Some(resolved.into()),
            no_matches: false,
        }),
        SearchOutcome::NoMatches => Json(SearchResponse {
            quote: None,
            no_matches: true,
        }),
    }
}
