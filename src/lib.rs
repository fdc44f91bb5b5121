// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod error;
pub mod history;
pub mod metrics;
pub mod orchestrator;
pub mod pool;
pub mod quote;
pub mod sources;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::orchestrator::{Orchestrator, Resolved, SearchOutcome};
pub use crate::quote::Quote;
pub use crate::sources::{Constraint, QuoteSource, SourceChain};
