//! Interview command: interactive read-loop driving the retrieval and
//! generation pipeline per question.

use std::io;
use std::io::Write;
use std::sync::Arc;

use tracing::info;

use crate::cache::ContextCache;
use crate::cache::RestCacheClient;
use crate::cli::output::print_separator;
use crate::config::AppConfig;
use crate::llm::LlmService;
use crate::rag::InterviewExchange;
use crate::rag::InterviewSession;
use crate::vector::VectorIndex;
use crate::vector::VectorRestClient;
use crate::Result;

/// Display name printed in front of each generated answer
const PERSONA_DISPLAY_NAME: &str = "NIÑO";

/// Canned interview questions selectable by number
const SUGGESTED_QUESTIONS: [&str; 12] = [
    "Tell me about yourself",
    "What are your technical strengths?",
    "Describe your most significant achievement",
    "Tell me about your robotics competition experience",
    "What programming languages are you proficient in?",
    "What projects have you built recently?",
    "What are your career goals?",
    "Why should we hire you?",
    "What are your salary expectations?",
    "Are you open to remote work?",
    "Describe a challenging problem you solved",
    "What technologies are you most excited about?",
];

pub async fn handle_interview_command(config: &AppConfig) -> Result<()> {
    println!();
    println!("🎯 DIGITAL TWIN INTERVIEW PRACTICE MODE");
    print_separator();
    println!("🤖 AI-Powered Professional Interview Simulation");
    println!(
        "💡 System: {} + hosted vector search + cache",
        config.llm_model()
    );
    print_separator();

    let index: Arc<dyn VectorIndex> = Arc::new(VectorRestClient::new(&config.vector)?);

    // Connection check doubles as the indexed-chunk readout
    let index_info = index.info().await?;
    println!(
        "✅ Connected to vector index - {} profile chunks indexed",
        index_info.vector_count
    );

    let cache = setup_cache(config);
    let llm = Arc::new(LlmService::new(&config.llm)?);
    println!("✅ LLM client initialized ({})", config.llm_model());

    let session = InterviewSession::new(index, cache, llm, config);
    println!();
    println!("✅ All systems ready! Interview simulation starting...");
    println!();

    print_suggestions();

    loop {
        print!("🎤 INTERVIEWER: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit")
            || input.eq_ignore_ascii_case("quit")
            || input.eq_ignore_ascii_case("q")
        {
            println!();
            println!("👋 Interview simulation ended. Good luck with your real interviews!");
            break;
        }

        // Numeric input selects a canned question
        let question = if let Ok(number) = input.parse::<usize>() {
            if (1..=SUGGESTED_QUESTIONS.len()).contains(&number) {
                SUGGESTED_QUESTIONS[number - 1].to_string()
            } else {
                println!(
                    "❌ Invalid number. Please choose 1-{}.",
                    SUGGESTED_QUESTIONS.len()
                );
                continue;
            }
        } else {
            input.to_string()
        };

        // A failed question never ends the simulation
        match session.ask(&question).await {
            Ok(exchange) => print_exchange(&exchange),
            Err(e) => {
                println!();
                println!("❌ Error: {e}");
                println!();
            }
        }
    }

    Ok(())
}

/// Cache setup never fails the command: missing credentials or a client
/// build error just degrade to always-miss retrieval.
fn setup_cache(config: &AppConfig) -> Option<Arc<dyn ContextCache>> {
    if !config.cache_enabled() {
        println!("ℹ️  Cache not configured (optional)");
        return None;
    }
    match RestCacheClient::new(&config.cache) {
        Ok(client) => {
            println!("✅ Cache connected (optional optimization)");
            Some(Arc::new(client))
        }
        Err(e) => {
            println!("ℹ️  Cache initialization skipped: {e}");
            None
        }
    }
}

fn print_suggestions() {
    println!("💭 SUGGESTED INTERVIEW QUESTIONS:");
    for (idx, suggestion) in SUGGESTED_QUESTIONS.iter().enumerate() {
        println!("   {}. {}", idx + 1, suggestion);
    }
    println!();
    print_separator();
    println!(
        "Type your question, 'exit' to quit, or a number (1-{}) for suggestions",
        SUGGESTED_QUESTIONS.len()
    );
    print_separator();
    println!();
}

/// Print one transcript entry: question, retrieval summary, timings, answer
fn print_exchange(exchange: &InterviewExchange) {
    println!();
    print_separator();
    println!("❓ INTERVIEWER: {}", exchange.question);
    print_separator();
    println!();

    println!("🔍 Searching professional profile...");
    if exchange.cache_hit {
        println!("💨 Cache hit - using cached context");
    }
    if exchange.context_parts.is_empty() {
        println!("📝 Using general knowledge");
    } else {
        println!(
            "📊 Found {} relevant chunks (avg score: {:.3})",
            exchange.context_parts.len(),
            exchange.avg_score
        );
        println!("📝 Context: {}", exchange.context_summary);
    }
    println!(
        "⏱️  Search time: {:.3}s",
        exchange.search_duration.as_secs_f64()
    );
    println!();

    println!("🤖 Generating response...");
    println!(
        "⏱️  Response time: {:.3}s",
        exchange.response_duration.as_secs_f64()
    );
    println!();
    println!("💬 {}: {}", PERSONA_DISPLAY_NAME, exchange.answer);
    println!();

    print_separator();
    println!(
        "📈 Performance: {:.3}s total | Search: {:.3}s | AI: {:.3}s",
        exchange.total_duration().as_secs_f64(),
        exchange.search_duration.as_secs_f64(),
        exchange.response_duration.as_secs_f64()
    );
    println!("🎯 Relevance Score: {:.3}", exchange.avg_score);
    print_separator();
    println!();

    info!(
        "Question answered: search={:.3}s response={:.3}s",
        exchange.search_duration.as_secs_f64(),
        exchange.response_duration.as_secs_f64()
    );
}
