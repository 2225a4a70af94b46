use std::env;

use anyhow::{Context, Result};

use crate::moderation::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::parser::ParsePolicy;

/// Central configuration loaded from environment variables.
///
/// The API key comes from the environment (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Groq API key. May be empty here; commands that call out check it.
    pub groq_api_key: String,
    /// OpenAI-compatible API root (defaults to Groq).
    pub api_url: String,
    /// Moderation model to query.
    pub model: String,
    /// How replies are parsed when --policy isn't given.
    pub parse_policy: ParsePolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything except the API key has a default.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable source.
    ///
    /// Blank values count as unset, so an empty `GUARDCHECK_MODEL=` line in
    /// .env falls back to the default instead of overriding it.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let parse_policy = match var("GUARDCHECK_PARSE_POLICY") {
            Some(raw) => raw.parse().context("Invalid GUARDCHECK_PARSE_POLICY")?,
            None => ParsePolicy::default(),
        };

        Ok(Self {
            groq_api_key: var("GROQ_API_KEY").unwrap_or_default(),
            api_url: var("GROQ_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: var("GUARDCHECK_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            parse_policy,
        })
    }

    /// Apply per-run overrides from the command line.
    pub fn with_overrides(
        mut self,
        api_key: Option<String>,
        model: Option<String>,
        policy: Option<ParsePolicy>,
    ) -> Self {
        if let Some(key) = api_key {
            self.groq_api_key = key;
        }
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(policy) = policy {
            self.parse_policy = policy;
        }
        self
    }

    /// Check that the Groq API key is configured.
    /// Call this before any operation that calls the moderation endpoint.
    pub fn require_api_key(&self) -> Result<()> {
        if self.groq_api_key.trim().is_empty() {
            anyhow::bail!(
                "GROQ_API_KEY not set. Add it to your .env file or pass --api-key.\n\
                 Get a key at https://console.groq.com/keys"
            );
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.groq_api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("Config")
            .field("groq_api_key", &key)
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("parse_policy", &self.parse_policy)
            .finish()
    }
}
