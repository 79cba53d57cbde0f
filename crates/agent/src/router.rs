//! Reference routers.

use async_trait::async_trait;
use super_agent_core::agent::{Context, MODE_DIRECT, MODE_PLAN, Router};
use super_agent_core::error::Result;

/// Always returns the same mode.
///
/// An empty mode defers to the orchestrator's configured `mode_default`.
pub struct StaticRouter {
    mode: String,
}

impl StaticRouter {
    pub fn new(mode: impl Into<String>) -> Self {
        Self { mode: mode.into() }
    }

    /// A router that always defers to `mode_default`.
    pub fn deferring() -> Self {
        Self::new("")
    }
}

#[async_trait]
impl Router for StaticRouter {
    async fn route(&self, _request: &str, _context: Option<&Context>) -> Result<String> {
        Ok(self.mode.clone())
    }
}

/// Routes to `plan` when the request contains a trigger phrase, `direct` otherwise.
///
/// Matching is case-insensitive and on whole words: `plan` matches
/// "make a plan" but not "planet". A trigger of several words matches the
/// same words in sequence.
pub struct KeywordRouter {
    triggers: Vec<Vec<String>>,
}

const DEFAULT_TRIGGERS: &[&str] = &["plan", "steps", "then"];

impl KeywordRouter {
    pub fn new() -> Self {
        Self::with_triggers(DEFAULT_TRIGGERS.iter().copied())
    }

    pub fn with_triggers<I, S>(triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            triggers: triggers
                .into_iter()
                .map(|t| {
                    let t = t.into().to_lowercase();
                    words(&t).map(str::to_string).collect::<Vec<_>>()
                })
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}

impl Default for KeywordRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Router for KeywordRouter {
    async fn route(&self, request: &str, _context: Option<&Context>) -> Result<String> {
        let lowered = request.to_lowercase();
        let request_words: Vec<&str> = words(&lowered).collect();
        let matched = self.triggers.iter().any(|trigger| {
            request_words
                .windows(trigger.len())
                .any(|window| window.iter().eq(trigger.iter()))
        });
        let mode = if matched {
            MODE_PLAN
        } else {
            MODE_DIRECT
        };
        Ok(mode.to_string())
    }
}

/// Alphanumeric words of `text`.
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}
