//! Reference planner.

use async_trait::async_trait;
use super_agent_core::agent::{Context, Planner};
use super_agent_core::error::Result;
use super_agent_core::plan::PlanStep;

const SENTENCE_ENDS: &[char] = &['.', '!', '?', ';'];
const THEN: &str = " then ";

/// Splits a request into one step per sentence or "then" clause.
///
/// `"Find the city, then check the weather. Summarize"` becomes three steps
/// with ids `"1"`, `"2"`, `"3"`. Empty pieces are dropped, so an empty
/// request gives an empty plan.
#[derive(Debug, Default)]
pub struct SentencePlanner;

impl SentencePlanner {
    pub fn new() -> Self {
        Self
    }

    /// The goals this planner would produce for `request`.
    pub fn goals(request: &str) -> Vec<String> {
        request
            .split(SENTENCE_ENDS)
            .flat_map(split_then)
            .map(|piece| strip_leading_then(piece.trim()).trim().to_string())
            .filter(|goal| !goal.is_empty())
            .collect()
    }
}

/// Split on " then ", ignoring ASCII case.
fn split_then(text: &str) -> Vec<&str> {
    let lowered = text.to_ascii_lowercase();
    let mut pieces = Vec::new();
    let mut start = 0;
    while let Some(pos) = lowered[start..].find(THEN) {
        pieces.push(&text[start..start + pos]);
        start += pos + THEN.len();
    }
    pieces.push(&text[start..]);
    pieces
}

fn strip_leading_then(piece: &str) -> &str {
    match piece.get(..5) {
        Some(head) if head.eq_ignore_ascii_case("then ") => &piece[5..],
        _ => piece,
    }
}

#[async_trait]
impl Planner for SentencePlanner {
    async fn decompose(&self, request: &str, _context: Option<&Context>) -> Result<Vec<PlanStep>> {
        Ok(Self::goals(request)
            .into_iter()
            .enumerate()
            .map(|(i, goal)| PlanStep::new((i + 1).to_string(), goal))
            .collect())
    }
}
