//! RAG core: context retrieval, persona response generation, and the
//! per-question pipeline that ties them together.

pub mod generator;
pub mod pipeline;
pub mod prompts;
pub mod retriever;

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

pub use generator::ResponseGenerator;
pub use generator::FALLBACK_RESPONSE;
pub use pipeline::InterviewExchange;
pub use pipeline::InterviewSession;
pub use retriever::ContextRetriever;

/// One retrieved chunk reference that passed the relevance threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextPart {
    pub id: String,
    pub score: f32,
    pub category: String,
}

/// Structured cache payload for a retrieval result.
///
/// Cached context is round-tripped through serde rather than interpreted as
/// literal code; a payload that fails to deserialize is treated as a miss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedContext {
    pub parts: Vec<ContextPart>,
    pub avg_score: f32,
}

/// Ephemeral per-query retrieval result
#[derive(Debug, Clone)]
pub struct RetrievedContext {
    /// Matches with score above the relevance threshold, rank order preserved
    pub parts: Vec<ContextPart>,
    /// Mean over all candidate scores, not just the retained ones
    pub avg_score: f32,
    /// Wall time of the vector-search call only (zero on a cache hit)
    pub search_duration: Duration,
    pub cache_hit: bool,
}
