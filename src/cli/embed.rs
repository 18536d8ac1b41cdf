//! Embed command: chunk the profile document, export the chunk list back
//! into it, and upload the batch to the vector index.

use crate::chunker::build_chunks;
use crate::config::AppConfig;
use crate::profile::ProfileDocument;
use crate::vector::upload_chunks;
use crate::vector::VectorIndex;
use crate::vector::VectorRestClient;
use crate::Result;
use crate::TwinRagError;

pub async fn handle_embed_command(config: &AppConfig) -> Result<()> {
    println!("🤖 Digital Twin Embedding");
    println!("{}", "=".repeat(50));
    println!("📋 Processing professional profile data...");

    let profile_path = config.profile_path();
    let mut document = ProfileDocument::load(profile_path)?;
    println!("✅ Loaded profile data from {profile_path}");

    let chunks = build_chunks(document.record());
    println!("✅ Created {} content chunks from profile data", chunks.len());

    // Export the derived chunks into the document for inspection; later runs
    // never read them back.
    document.set_chunks(&chunks)?;
    document.save(profile_path)?;
    println!("✅ Updated {profile_path} with content_chunks");

    let index = VectorRestClient::new(&config.vector)?;
    run_upload(&index, &chunks).await
}

/// Upload stage, separated so tests can drive it with a stub index
pub async fn run_upload(index: &dyn VectorIndex, chunks: &[crate::models::Chunk]) -> Result<()> {
    if upload_chunks(index, chunks).await {
        println!("🎉 Digital twin embedding completed successfully!");
        println!("Your professional profile is now ready for interview queries.");
        Ok(())
    } else {
        println!("❌ Embedding process failed. Check your environment variables and try again.");
        Err(TwinRagError::VectorStore(
            "chunk upload failed".to_string(),
        ))
    }
}
