// src/config.rs
// Runtime configuration: bind address, chain order, per-source base URLs and
// the dev-proxy transport split. Loaded from TOML with env overrides.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const ENV_CONFIG_PATH: &str = "QUOTIDIAN_CONFIG_PATH";
pub const ENV_PROXY_BASE: &str = "QUOTIDIAN_PROXY_BASE";
pub const ENV_BIND: &str = "QUOTIDIAN_BIND";
pub const DEFAULT_CONFIG_PATH: &str = "config/quotidian.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Quotable,
    Zenquotes,
    Ninjas,
}

impl SourceKind {
    /// Direct upstream base URL, used in production transport.
    pub fn direct_base(&self) -> &'static str {
        match self {
            SourceKind::Quotable => "https://api.quotable.io",
            SourceKind::Zenquotes => "https://zenquotes.io/api",
            SourceKind::Ninjas => "https://api.api-ninjas.com/v1",
        }
    }

    /// Path segment under the rewriting dev proxy.
    pub fn proxy_segment(&self) -> &'static str {
        match self {
            SourceKind::Quotable => "quotable",
            SourceKind::Zenquotes => "zenquotes",
            SourceKind::Ninjas => "ninjas",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceCfg {
    pub kind: SourceKind,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Explicit override; wins over both proxy and direct bases.
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind: String,
    pub attempt_timeout_ms: u64,
    pub history_capacity: usize,
    /// Rewriting intermediary for local development, e.g.
    /// "http://localhost:5173/api". Honored in debug builds only; release
    /// builds always call upstreams directly.
    pub proxy_base: Option<String>,
    /// Priority order of the chain: first entry is tried first.
    pub sources: Vec<SourceCfg>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            attempt_timeout_ms: 4_000,
            history_capacity: crate::history::DEFAULT_CAPACITY,
            proxy_base: None,
            sources: vec![
                SourceCfg {
                    kind: SourceKind::Quotable,
                    enabled: true,
                    base_url: None,
                },
                SourceCfg {
                    kind: SourceKind::Zenquotes,
                    enabled: true,
                    base_url: None,
                },
                SourceCfg {
                    kind: SourceKind::Ninjas,
                    enabled: true,
                    base_url: None,
                },
            ],
        }
    }
}

impl AppConfig {
    /// Load from $QUOTIDIAN_CONFIG_PATH, then config/quotidian.toml, falling
    /// back to built-in defaults when neither exists. Env vars override the
    /// bind address and proxy base afterwards.
    pub fn load() -> Result<Self> {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading config from {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("parsing config from {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(proxy) = std::env::var(ENV_PROXY_BASE) {
            if !proxy.trim().is_empty() {
                cfg.proxy_base = Some(proxy);
            }
        }
        if let Ok(bind) = std::env::var(ENV_BIND) {
            if !bind.trim().is_empty() {
                cfg.bind = bind;
            }
        }

        Ok(cfg)
    }

    /// Transport selection only; normalization and policy never depend on it.
    /// Debug builds route through the proxy base when one is configured,
    /// release builds go straight to the upstream.
    pub fn resolved_base(&self, source: &SourceCfg) -> String {
        if let Some(explicit) = &source.base_url {
            return explicit.trim_end_matches('/').to_string();
        }
        if cfg!(debug_assertions) {
            if let Some(proxy) = &self.proxy_base {
                return format!(
                    "{}/{}",
                    proxy.trim_end_matches('/'),
                    source.kind.proxy_segment()
                );
            }
        } else if self.proxy_base.is_some() {
            tracing::debug!("proxy_base is set but ignored in release builds");
        }
        source.kind.direct_base().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chain_order_is_quotable_first() {
        let cfg = AppConfig::default();
        let kinds: Vec<SourceKind> = cfg.sources.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SourceKind::Quotable, SourceKind::Zenquotes, SourceKind::Ninjas]
        );
        assert!(cfg.sources.iter().all(|s| s.enabled));
    }

    #[test]
    fn explicit_base_url_wins() {
        let cfg = AppConfig::default();
        let src = SourceCfg {
            kind: SourceKind::Quotable,
            enabled: true,
            base_url: Some("http://127.0.0.1:9999/quotable/".into()),
        };
        assert_eq!(cfg.resolved_base(&src), "http://127.0.0.1:9999/quotable");
    }

    #[test]
    fn parses_toml_chain() {
        let cfg: AppConfig = toml::from_str(
            r#"
            bind = "127.0.0.1:9000"
            attempt_timeout_ms = 1500

            [[sources]]
            kind = "zenquotes"

            [[sources]]
            kind = "quotable"
            enabled = false
            "#,
        )
        .expect("parse toml");
        assert_eq!(cfg.bind, "127.0.0.1:9000");
        assert_eq!(cfg.attempt_timeout_ms, 1500);
        assert_eq!(cfg.sources.len(), 2);
        assert_eq!(cfg.sources[0].kind, SourceKind::Zenquotes);
        assert!(!cfg.sources[1].enabled);
    }
}
