use clap::Parser;
use clap::Subcommand;
use tracing::info;
use twinrag::cli::handle_embed_command;
use twinrag::cli::handle_interview_command;
use twinrag::cli::output::mask_endpoint;
use twinrag::cli::output::mask_secret;
use twinrag::config::AppConfig;
use twinrag::Result;

#[derive(Parser)]
#[command(name = "twinrag")]
#[command(about = "Digital-twin interview practice: profile chunking and RAG question answering")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chunk the profile document and upload the chunks to the vector index
    Embed,
    /// Run the interactive interview simulation
    Interview,
    /// Show current configuration with secrets masked
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        twinrag::logging::init_logging_with_level("debug")?;
    } else {
        twinrag::logging::init_logging()?;
    }

    match cli.command {
        Commands::Embed => {
            let config = AppConfig::load()?;
            info!("Configuration loaded successfully");
            handle_embed_command(&config).await?;
        }
        Commands::Interview => {
            let config = AppConfig::load()?;
            info!("Configuration loaded successfully");
            handle_interview_command(&config).await?;
        }
        Commands::Config => {
            // Display skips credential validation so a partial setup can
            // still be inspected
            let config = AppConfig::resolve()?;
            print_config(&config);
        }
    }

    Ok(())
}

fn print_config(config: &AppConfig) {
    println!("📋 twinrag Configuration:");
    println!();

    println!("🔎 Vector index:");
    println!("  URL: {}", mask_endpoint(&config.vector.rest_url));
    println!("  Token: {}", mask_secret(&config.vector.rest_token));
    println!();

    println!("🧠 LLM:");
    println!("  Endpoint: {}", mask_endpoint(config.llm_endpoint()));
    println!("  Key: {}", mask_secret(config.llm_key()));
    println!("  Model: {}", config.llm_model());
    println!();

    println!("⚡ Cache:");
    println!("  URL: {}", mask_endpoint(&config.cache.rest_url));
    println!("  Token: {}", mask_secret(&config.cache.rest_token));
    println!("  TTL: {}s", config.cache.ttl_secs);
    println!();

    println!("🎯 Retrieval:");
    println!("  Top K: {}", config.top_k());
    println!("  Score threshold: {}", config.score_threshold());
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!();

    println!("👤 Profile:");
    println!("  Path: {}", config.profile_path());
}
