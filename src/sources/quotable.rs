// src/sources/quotable.rs
// Quotable (api.quotable.io): random-by-tag plus server-side keyword search.
// The only provider in the chain with a stable upstream id.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SourceError;
use crate::quote::{normalize_author, normalize_tags, normalize_text, synthesize_id, Quote};
use crate::sources::{Constraint, QuoteSource};

#[derive(Debug, Deserialize)]
struct RawQuote {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    count: usize,
    #[serde(default)]
    results: Vec<RawQuote>,
}

pub struct QuotableSource {
    mode: Mode,
}

enum Mode {
    /// Embedded response body, for exercising normalization without network.
    Fixture(String),
    #[cfg(feature = "source-http")]
    Http {
        base: String,
        client: reqwest::Client,
    },
}

impl QuotableSource {
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

    fn normalize(raw: RawQuote) -> Result<Quote, SourceError> {
        let content = normalize_text(&raw.content);
        if content.is_empty() {
            return Err(SourceError::Malformed("quote body is empty".into()));
        }
        let author = normalize_author(&raw.author, &[]);
        let id = if raw.id.trim().is_empty() {
            synthesize_id("quotable", &content, &author)
        } else {
            raw.id
        };
        Ok(Quote {
            id,
            content,
            author,
            tags: normalize_tags(raw.tags),
        })
    }

    fn parse_random(body: &str) -> Result<Quote, SourceError> {
        let raw: RawQuote =
            serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))?;
        Self::normalize(raw)
    }

    fn parse_search(body: &str) -> Result<Quote, SourceError> {
        let page: SearchPage =
            serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))?;
        if page.count == 0 || page.results.is_empty() {
            // zero matches is a chain failure, not an empty quote
            return Err(SourceError::Empty);
        }
        let first = page.results.into_iter().next().ok_or(SourceError::Empty)?;
        Self::normalize(first)
    }

    #[cfg(feature = "source-http")]
    async fn get(
        client: &reqwest::Client,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<String, SourceError> {
        let resp = client.get(url).query(params).send().await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status().as_u16()));
        }
        Ok(resp.text().await?)
    }
}

#[async_trait]
impl QuoteSource for QuotableSource {
    fn name(&self) -> &'static str {
        "quotable"
    }

    async fn fetch_random(&self, constraint: Option<&Constraint>) -> Result<Quote, SourceError> {
        // Free-text narrowing goes through the search endpoint instead.
        if let Some(Constraint::Query(q)) = constraint {
            return self.search(q).await;
        }

        match &self.mode {
            Mode::Fixture(body) => Self::parse_random(body),

            #[cfg(feature = "source-http")]
            Mode::Http { base, client } => {
                let url = format!("{base}/random");
                let body = match constraint {
                    Some(Constraint::Tag(tag)) => {
                        Self::get(client, &url, &[("tags", tag.as_str())]).await?
                    }
                    _ => Self::get(client, &url, &[]).await?,
                };
                Self::parse_random(&body)
            }
        }
    }

    fn supports_search(&self) -> bool {
        true
    }

    async fn search(&self, query: &str) -> Result<Quote, SourceError> {
        match &self.mode {
            Mode::Fixture(body) => Self::parse_search(body),

            #[cfg(feature = "source-http")]
            Mode::Http { base, client } => {
                let url = format!("{base}/search/quotes");
                let body = Self::get(client, &url, &[("query", query), ("limit", "1")]).await?;
                Self::parse_search(&body)
            }
        }
    }
}
