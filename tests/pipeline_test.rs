//! End-to-end pipeline tests over stub collaborators: chunk a profile,
//! upload it to an in-memory index, and drive the interview session against
//! it.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use twinrag::cache::ContextCache;
use twinrag::chunker::build_chunks;
use twinrag::llm::ChatCompletion;
use twinrag::llm::SamplingParams;
use twinrag::models::ProfileRecord;
use twinrag::rag::pipeline::summarize_context;
use twinrag::rag::ContextRetriever;
use twinrag::rag::InterviewSession;
use twinrag::rag::ResponseGenerator;
use twinrag::rag::FALLBACK_RESPONSE;
use twinrag::vector::upload_chunks;
use twinrag::vector::IndexInfo;
use twinrag::vector::QueryMatch;
use twinrag::vector::UpsertItem;
use twinrag::vector::VectorIndex;
use twinrag::Result;
use twinrag::TwinRagError;

/// In-memory vector index: stores upserted items and answers queries with
/// descending canned scores in insertion order.
#[derive(Default)]
struct FakeIndex {
    items: Mutex<Vec<UpsertItem>>,
}

#[async_trait]
impl VectorIndex for FakeIndex {
    async fn upsert(&self, items: Vec<UpsertItem>) -> Result<()> {
        self.items.lock().unwrap().extend(items);
        Ok(())
    }

    async fn query(&self, _: &str, top_k: usize, _: bool) -> Result<Vec<QueryMatch>> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .take(top_k)
            .enumerate()
            .map(|(rank, item)| QueryMatch {
                id: item.id.clone(),
                score: 0.95 - 0.1 * rank as f32,
                metadata: Some(item.metadata.clone()),
            })
            .collect())
    }

    async fn info(&self) -> Result<IndexInfo> {
        let count = self.items.lock().unwrap().len() as u64;
        Ok(IndexInfo {
            vector_count: count,
        })
    }
}

/// LLM stub that echoes the context summary it was handed
struct EchoLlm;

#[async_trait]
impl ChatCompletion for EchoLlm {
    async fn complete(
        &self,
        system_instruction: &str,
        user_message: &str,
        _: &SamplingParams,
    ) -> Result<String> {
        assert!(system_instruction.contains("CONTEXT FROM PROFILE:"));
        Ok(format!("Answering: {user_message}"))
    }
}

struct FailingLlm;

#[async_trait]
impl ChatCompletion for FailingLlm {
    async fn complete(&self, _: &str, _: &str, _: &SamplingParams) -> Result<String> {
        Err(TwinRagError::Llm("service unavailable".to_string()))
    }
}

/// Recording cache used to observe read-through behavior
#[derive(Default)]
struct MemoryCache {
    entries: Mutex<std::collections::HashMap<String, String>>,
}

#[async_trait]
impl ContextCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set_ex(&self, key: &str, value: &str, _: u64) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn sample_profile() -> ProfileRecord {
    serde_json::from_value(json!({
        "personal": {
            "name": "Ada Example",
            "title": "IT Student",
            "contact": { "email": "ada@example.com" }
        },
        "experience": [
            {
                "company": "Acme Corp",
                "title": "Intern",
                "achievements_star": [
                    { "situation": "s", "task": "t", "action": "a", "result": "r" }
                ]
            }
        ],
        "skills": {
            "technical": {
                "programming_languages": [
                    { "language": "Rust", "years": 2, "proficiency": "Advanced" }
                ]
            },
            "soft_skills": ["Communication"]
        }
    }))
    .unwrap()
}

fn session(
    index: Arc<dyn VectorIndex>,
    cache: Option<Arc<dyn ContextCache>>,
    llm: Arc<dyn ChatCompletion>,
) -> InterviewSession {
    let retriever = ContextRetriever::new(index, cache, 0.7, 300);
    InterviewSession::from_services(retriever, ResponseGenerator::new(llm), 3)
}

#[tokio::test]
async fn test_chunk_upload_then_interview_round_trip() {
    let index = Arc::new(FakeIndex::default());
    let chunks = build_chunks(&sample_profile());
    assert!(upload_chunks(index.as_ref(), &chunks).await);
    assert_eq!(
        index.info().await.unwrap().vector_count,
        chunks.len() as u64
    );

    let session = session(index, None, Arc::new(EchoLlm));
    let exchange = session.ask("Tell me about yourself").await.unwrap();

    // All three canned scores (0.95, 0.85, 0.75) pass the 0.7 threshold
    assert_eq!(exchange.context_parts.len(), 3);
    assert!((exchange.avg_score - 0.85).abs() < 1e-3);
    // Summary labels come from the uploaded chunk attributes, top two only
    assert_eq!(
        exchange.context_summary,
        "personal (relevance: 0.95) | contact (relevance: 0.85)"
    );
    assert_eq!(exchange.answer, "Answering: Tell me about yourself");
    assert!(!exchange.cache_hit);
}

#[tokio::test]
async fn test_second_ask_hits_cache_and_skips_search() {
    let index = Arc::new(FakeIndex::default());
    let chunks = build_chunks(&sample_profile());
    assert!(upload_chunks(index.as_ref(), &chunks).await);

    let cache = Arc::new(MemoryCache::default());
    let session = session(index, Some(cache.clone()), Arc::new(EchoLlm));

    let first = session.ask("Tell me about yourself").await.unwrap();
    assert!(!first.cache_hit);
    assert_eq!(cache.entries.lock().unwrap().len(), 1);

    let second = session.ask("Tell me about yourself").await.unwrap();
    assert!(second.cache_hit);
    assert_eq!(second.search_duration, Duration::ZERO);
    assert_eq!(second.context_parts, first.context_parts);
}

#[tokio::test]
async fn test_generation_failure_yields_fallback_answer() {
    let index = Arc::new(FakeIndex::default());
    let chunks = build_chunks(&sample_profile());
    assert!(upload_chunks(index.as_ref(), &chunks).await);

    let session = session(index, None, Arc::new(FailingLlm));
    let exchange = session.ask("Why should we hire you?").await.unwrap();

    assert_eq!(exchange.answer, FALLBACK_RESPONSE);
    assert_eq!(exchange.response_duration, Duration::ZERO);
    // Retrieval still succeeded, so context metadata survives the fallback
    assert!(!exchange.context_parts.is_empty());
}

#[tokio::test]
async fn test_empty_index_falls_back_to_general_knowledge() {
    let session = session(Arc::new(FakeIndex::default()), None, Arc::new(EchoLlm));
    let exchange = session.ask("What are your career goals?").await.unwrap();

    assert!(exchange.context_parts.is_empty());
    assert!((exchange.avg_score - 0.0).abs() < f32::EPSILON);
    assert_eq!(exchange.context_summary, "General profile knowledge");
    assert_eq!(summarize_context(&exchange.context_parts), exchange.context_summary);
}
