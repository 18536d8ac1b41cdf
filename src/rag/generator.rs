//! Persona response generation with a fixed fallback on collaborator
//! failure.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use tracing::debug;
use tracing::error;

use crate::llm::ChatCompletion;
use crate::llm::SamplingParams;
use crate::rag::prompts::InterviewPrompts;

/// Returned in place of an answer when the LLM collaborator fails. The
/// interview loop never crashes on a generation error.
pub const FALLBACK_RESPONSE: &str =
    "I apologize, I'm having trouble responding right now. Could you rephrase your question?";

pub struct ResponseGenerator {
    llm: Arc<dyn ChatCompletion>,
    params: SamplingParams,
}

impl ResponseGenerator {
    pub fn new(llm: Arc<dyn ChatCompletion>) -> Self {
        Self {
            llm,
            params: SamplingParams {
                temperature: 0.7,
                top_p: 0.9,
                max_tokens: 400,
            },
        }
    }

    /// Build the role-played system instruction for a context summary
    fn system_instruction(context_summary: &str) -> String {
        let mut values = HashMap::new();
        values.insert("context".to_string(), context_summary.to_string());
        InterviewPrompts::system().render(&values)
    }

    /// Generate an interview answer for the question.
    ///
    /// On collaborator failure the error is logged and the literal fallback
    /// apology is returned with a zero duration; this function never fails.
    pub async fn generate(&self, query: &str, context_summary: &str) -> (String, Duration) {
        let system = Self::system_instruction(context_summary);
        debug!("Generating response for question: {query}");

        let start = Instant::now();
        match self.llm.complete(&system, query, &self.params).await {
            Ok(text) => (text, start.elapsed()),
            Err(e) => {
                error!("LLM API error: {e}");
                (FALLBACK_RESPONSE.to_string(), Duration::ZERO)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::errors::TwinRagError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubLlm {
        response: Result<String>,
        calls: Mutex<Vec<(String, String, f32, f32, u32)>>,
    }

    impl StubLlm {
        fn ok(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                calls: Mutex::new(vec![]),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(TwinRagError::Llm("rate limited".to_string())),
                calls: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl ChatCompletion for StubLlm {
        async fn complete(
            &self,
            system_instruction: &str,
            user_message: &str,
            params: &SamplingParams,
        ) -> Result<String> {
            self.calls.lock().unwrap().push((
                system_instruction.to_string(),
                user_message.to_string(),
                params.temperature,
                params.top_p,
                params.max_tokens,
            ));
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(TwinRagError::Llm("rate limited".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_successful_generation_returns_text() {
        let llm = Arc::new(StubLlm::ok("I am a student."));
        let generator = ResponseGenerator::new(llm.clone());
        let (text, duration) = generator
            .generate("Tell me about yourself", "General profile knowledge")
            .await;
        assert_eq!(text, "I am a student.");
        assert!(duration > Duration::ZERO);

        let calls = llm.calls.lock().unwrap();
        let (system, user, temperature, top_p, max_tokens) = &calls[0];
        assert!(system.contains("CONTEXT FROM PROFILE: General profile knowledge"));
        assert_eq!(user, "Tell me about yourself");
        assert!((temperature - 0.7).abs() < f32::EPSILON);
        assert!((top_p - 0.9).abs() < f32::EPSILON);
        assert_eq!(*max_tokens, 400);
    }

    #[tokio::test]
    async fn test_failure_returns_fallback_with_zero_duration() {
        let generator = ResponseGenerator::new(Arc::new(StubLlm::failing()));
        let (text, duration) = generator
            .generate("Why should we hire you?", "skills (relevance: 0.91)")
            .await;
        assert_eq!(text, FALLBACK_RESPONSE);
        assert_eq!(duration, Duration::ZERO);
    }
}
