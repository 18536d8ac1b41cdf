//! Context retrieval: cache check, nearest-neighbor query, relevance
//! filtering and cache write-back.

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use tracing::debug;
use tracing::warn;

use crate::cache::ContextCache;
use crate::rag::CachedContext;
use crate::rag::ContextPart;
use crate::rag::RetrievedContext;
use crate::vector::VectorIndex;
use crate::Result;

/// Cache keys truncate the query to this many characters. Two distinct long
/// questions sharing the same prefix therefore collide and return the same
/// cached context; known behavior, kept as-is.
pub const CACHE_KEY_PREFIX_CHARS: usize = 50;

/// Derive the cache key for a query (char-boundary safe)
pub fn cache_key(query: &str) -> String {
    let prefix: String = query.chars().take(CACHE_KEY_PREFIX_CHARS).collect();
    format!("rag_context:{prefix}")
}

/// Retriever over the vector-search collaborator with an optional
/// read-through cache.
pub struct ContextRetriever {
    index: Arc<dyn VectorIndex>,
    cache: Option<Arc<dyn ContextCache>>,
    score_threshold: f32,
    cache_ttl_secs: u64,
}

impl ContextRetriever {
    pub fn new(
        index: Arc<dyn VectorIndex>,
        cache: Option<Arc<dyn ContextCache>>,
        score_threshold: f32,
        cache_ttl_secs: u64,
    ) -> Self {
        Self {
            index,
            cache,
            score_threshold,
            cache_ttl_secs,
        }
    }

    /// Retrieve relevant context for a question.
    ///
    /// On a cache hit the vector search is skipped entirely and the reported
    /// search duration is zero. On a miss, a single nearest-neighbor query
    /// runs; only that call is timed. Matches above the relevance threshold
    /// become context parts, while the average is taken over all returned
    /// scores, so the average can sit below the threshold even when parts
    /// were retained. Cache failures never propagate; vector-store failures
    /// do.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<RetrievedContext> {
        let key = cache_key(query);

        if let Some(cache) = &self.cache {
            match cache.get(&key).await {
                Ok(Some(payload)) => {
                    // Structured round-trip; an undecodable payload is a miss
                    match serde_json::from_str::<CachedContext>(&payload) {
                        Ok(cached) => {
                            debug!("Cache hit for key {key}");
                            return Ok(RetrievedContext {
                                parts: cached.parts,
                                avg_score: cached.avg_score,
                                search_duration: Duration::ZERO,
                                cache_hit: true,
                            });
                        }
                        Err(e) => debug!("Discarding undecodable cache payload: {e}"),
                    }
                }
                Ok(None) => {}
                Err(e) => debug!("Cache read failed, falling through to search: {e}"),
            }
        }

        let start = Instant::now();
        let matches = self.index.query(query, top_k, true).await?;
        let search_duration = start.elapsed();

        if matches.is_empty() {
            warn!("No relevant context found");
            return Ok(RetrievedContext {
                parts: Vec::new(),
                avg_score: 0.0,
                search_duration,
                cache_hit: false,
            });
        }

        let mut parts = Vec::new();
        let mut scores = Vec::new();
        for result in &matches {
            scores.push(result.score);
            if result.score > self.score_threshold {
                let category = result
                    .metadata
                    .as_ref()
                    .map_or_else(|| "general".to_string(), |m| m.category.to_string());
                parts.push(ContextPart {
                    id: result.id.clone(),
                    score: result.score,
                    category,
                });
            }
        }

        let avg_score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f32>() / scores.len() as f32
        };

        if !parts.is_empty() {
            if let Some(cache) = &self.cache {
                // Write-back failures are swallowed; the cache is only an
                // optimization
                match serde_json::to_string(&CachedContext {
                    parts: parts.clone(),
                    avg_score,
                }) {
                    Ok(payload) => {
                        if let Err(e) = cache.set_ex(&key, &payload, self.cache_ttl_secs).await {
                            debug!("Cache write failed: {e}");
                        }
                    }
                    Err(e) => debug!("Cache payload encoding failed: {e}"),
                }
            }
        }

        Ok(RetrievedContext {
            parts,
            avg_score,
            search_duration,
            cache_hit: false,
        })
    }
}
