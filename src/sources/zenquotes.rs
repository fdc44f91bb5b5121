// src/sources/zenquotes.rs
// ZenQuotes (zenquotes.io/api): random only. No tags, no upstream id, and a
// throttle notice that arrives disguised as a regular quote.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SourceError;
use crate::quote::{normalize_author, normalize_text, synthesize_id, Quote};
use crate::sources::{Constraint, QuoteSource};

/// Placeholder author ZenQuotes uses for its own service messages.
const SENTINEL_AUTHOR: &str = "zenquotes.io";

#[derive(Debug, Deserialize)]
struct RawQuote {
    #[serde(default)]
    q: String,
    #[serde(default)]
    a: String,
}

pub struct ZenQuotesSource {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    #[cfg(feature = "source-http")]
    Http {
        base: String,
        client: reqwest::Client,
    },
}

impl ZenQuotesSource {
    pub fn from_fixture(body: &str) -> Self {
        Self {
            mode: Mode::Fixture(body.to_string()),
        }
    }

    #[cfg(feature = "source-http")]
    pub fn from_base(base: String) -> Self {
        Self {
            mode: Mode::Http {
                base,
                client: reqwest::Client::new(),
            },
        }
    }

    fn parse_random(body: &str) -> Result<Quote, SourceError> {
        let items: Vec<RawQuote> =
            serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))?;
        let first = items.into_iter().next().ok_or(SourceError::Empty)?;

        // Rate-limit notices come back with the service domain as the
        // author. That is not a quote; let the chain try the next source.
        if first.a.trim().eq_ignore_ascii_case(SENTINEL_AUTHOR)
            && first.q.to_lowercase().contains("too many requests")
        {
            return Err(SourceError::Throttled);
        }

        let content = normalize_text(&first.q);
        if content.is_empty() {
            return Err(SourceError::Malformed("quote body is empty".into()));
        }
        let author = normalize_author(&first.a, &[SENTINEL_AUTHOR]);
        Ok(Quote {
            id: synthesize_id("zen", &content, &author),
            content,
            author,
            tags: Vec::new(),
        })
    }
}

#[async_trait]
impl QuoteSource for ZenQuotesSource {
    fn name(&self) -> &'static str {
        "zenquotes"
    }

    async fn fetch_random(&self, constraint: Option<&Constraint>) -> Result<Quote, SourceError> {
        // No server-side tag or keyword filter on this API.
        if constraint.is_some() {
            return Err(SourceError::UnsupportedConstraint);
        }

        match &self.mode {
            Mode::Fixture(body) => Self::parse_random(body),

            #[cfg(feature = "source-http")]
            Mode::Http { base, client } => {
                let url = format!("{base}/random");
                let resp = client.get(&url).send().await?;
                if !resp.status().is_success() {
                    return Err(SourceError::Status(resp.status().as_u16()));
                }
                let body = resp.text().await?;
                Self::parse_random(&body)
            }
        }
    }
}
