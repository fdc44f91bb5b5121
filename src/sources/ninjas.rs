// src/sources/ninjas.rs
// API Ninjas (api.api-ninjas.com/v1): random with an optional category
// filter. Responds with an array; no upstream id, single category per quote.
// No credentials are attached, so this source runs at the free anonymous tier.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SourceError;
use crate::quote::{normalize_author, normalize_tags, normalize_text, synthesize_id, Quote};
use crate::sources::{Constraint, QuoteSource};

#[derive(Debug, Deserialize)]
struct RawQuote {
    #[serde(default)]
    quote: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    category: String,
}

pub struct NinjasSource {
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

impl NinjasSource {
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

        let content = normalize_text(&first.quote);
        if content.is_empty() {
            return Err(SourceError::Malformed("quote body is empty".into()));
        }
        let author = normalize_author(&first.author, &[]);
        Ok(Quote {
            id: synthesize_id("ninjas", &content, &author),
            content,
            author,
            tags: normalize_tags([first.category]),
        })
    }
}

#[async_trait]
impl QuoteSource for NinjasSource {
    fn name(&self) -> &'static str {
        "ninjas"
    }

    async fn fetch_random(&self, constraint: Option<&Constraint>) -> Result<Quote, SourceError> {
        // Tags map onto categories; free-text search has no server-side form.
        if let Some(Constraint::Query(_)) = constraint {
            return Err(SourceError::UnsupportedConstraint);
        }

        match &self.mode {
            Mode::Fixture(body) => Self::parse_random(body),

            #[cfg(feature = "source-http")]
            Mode::Http { base, client } => {
                let url = format!("{base}/quotes");
                let mut req = client.get(&url);
                if let Some(Constraint::Tag(tag)) = constraint {
                    req = req.query(&[("category", tag.as_str())]);
                }
                let resp = req.send().await?;
                if !resp.status().is_success() {
                    return Err(SourceError::Status(resp.status().as_u16()));
                }
                let body = resp.text().await?;
                Self::parse_random(&body)
            }
        }
    }
}
