//! Per-question interview pipeline: retrieve context, summarize it, generate
//! the persona answer.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use tracing::info;

use crate::cache::ContextCache;
use crate::config::AppConfig;
use crate::llm::ChatCompletion;
use crate::rag::ContextPart;
use crate::rag::ContextRetriever;
use crate::rag::ResponseGenerator;
use crate::vector::VectorIndex;
use crate::Result;

/// Everything the interview loop needs to print one transcript entry
#[derive(Debug, Clone)]
pub struct InterviewExchange {
    pub question: String,
    pub context_parts: Vec<ContextPart>,
    pub context_summary: String,
    pub avg_score: f32,
    pub cache_hit: bool,
    pub search_duration: Duration,
    pub answer: String,
    pub response_duration: Duration,
}

impl InterviewExchange {
    /// Combined search + generation wall time
    pub fn total_duration(&self) -> Duration {
        self.search_duration + self.response_duration
    }
}

/// The complete question-answering service, built from dependency-injected
/// collaborator handles.
pub struct InterviewSession {
    retriever: ContextRetriever,
    generator: ResponseGenerator,
    top_k: usize,
}

impl InterviewSession {
    /// Create a session from collaborator handles and config tuning
    pub fn new(
        index: Arc<dyn VectorIndex>,
        cache: Option<Arc<dyn ContextCache>>,
        llm: Arc<dyn ChatCompletion>,
        config: &AppConfig,
    ) -> Self {
        let retriever = ContextRetriever::new(
            index,
            cache,
            config.score_threshold(),
            config.cache.ttl_secs,
        );
        let generator = ResponseGenerator::new(llm);
        Self {
            retriever,
            generator,
            top_k: config.top_k(),
        }
    }

    /// Create from already-built services (test seam)
    pub fn from_services(
        retriever: ContextRetriever,
        generator: ResponseGenerator,
        top_k: usize,
    ) -> Self {
        Self {
            retriever,
            generator,
            top_k,
        }
    }

    /// Answer one interview question.
    ///
    /// Retrieval errors propagate; generation errors are absorbed into the
    /// fallback answer inside the generator.
    pub async fn ask(&self, question: &str) -> Result<InterviewExchange> {
        info!("Processing interview question: {question}");

        debug!("Step 1: Retrieving context");
        let retrieved = self.retriever.retrieve(question, self.top_k).await?;

        let context_summary = summarize_context(&retrieved.parts);
        debug!("Context summary: {context_summary}");

        debug!("Step 2: Generating response");
        let (answer, response_duration) =
            self.generator.generate(question, &context_summary).await;

        Ok(InterviewExchange {
            question: question.to_string(),
            context_parts: retrieved.parts,
            context_summary,
            avg_score: retrieved.avg_score,
            cache_hit: retrieved.cache_hit,
            search_duration: retrieved.search_duration,
            answer,
            response_duration,
        })
    }
}

/// Build the context summary handed to the generator: the top two parts as
/// `category (relevance: x.xx)` joined with ` | `, or the general-knowledge
/// marker when nothing passed the threshold.
pub fn summarize_context(parts: &[ContextPart]) -> String {
    if parts.is_empty() {
        return "General profile knowledge".to_string();
    }
    parts
        .iter()
        .take(2)
        .map(|c| format!("{} (relevance: {:.2})", c.category, c.score))
        .collect::<Vec<_>>()
        .join(" | ")
}
