//! Chunk uploader: serialize chunks into upsert items and submit them as a
//! single batch.

use tracing::error;
use tracing::info;

use crate::models::Chunk;
use crate::vector::UpsertItem;
use crate::vector::VectorAttributes;
use crate::vector::VectorIndex;

/// Build the embeddable text for a chunk.
///
/// Title plus content embeds better than raw content alone for short or
/// ambiguous queries.
fn enriched_text(chunk: &Chunk) -> String {
    format!("{}: {}", chunk.title, chunk.content)
}

fn to_upsert_item(chunk: &Chunk) -> UpsertItem {
    UpsertItem {
        id: chunk.id.clone(),
        data: enriched_text(chunk),
        metadata: VectorAttributes {
            title: chunk.title.clone(),
            kind: chunk.kind,
            content: chunk.content.clone(),
            category: chunk.metadata.category,
            tags: chunk.metadata.tags.clone(),
        },
    }
}

/// Upload all chunks as one batch upsert and verify by item-count readback.
///
/// Returns `false` (after logging) on any collaborator error; there is no
/// retry and no per-item success tracking. Chunk counts are small enough
/// that a single batch call is fine.
pub async fn upload_chunks(index: &dyn VectorIndex, chunks: &[Chunk]) -> bool {
    info!("Uploading {} content chunks to vector index", chunks.len());

    let items: Vec<UpsertItem> = chunks.iter().map(to_upsert_item).collect();

    if let Err(e) = index.upsert(items).await {
        error!("Error uploading vectors: {e}");
        return false;
    }

    // Readback verification: collection size only, not per-item success
    match index.info().await {
        Ok(info_result) => {
            info!(
                "Successfully uploaded {} vectors; index now reports {} total",
                chunks.len(),
                info_result.vector_count
            );
            true
        }
        Err(e) => {
            error!("Error verifying upload: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::errors::TwinRagError;
    use crate::models::Category;
    use crate::models::ChunkMetadata;
    use crate::models::ChunkType;
    use crate::vector::IndexInfo;
    use crate::vector::QueryMatch;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn sample_chunk() -> Chunk {
        Chunk {
            id: "chunk_1".to_string(),
            title: "Personal Profile".to_string(),
            kind: ChunkType::PersonalInfo,
            content: "Name: Ada".to_string(),
            metadata: ChunkMetadata {
                category: Category::Personal,
                tags: vec!["profile".to_string()],
            },
        }
    }

    #[derive(Default)]
    struct RecordingIndex {
        upserted: Mutex<Vec<UpsertItem>>,
        fail_upsert: bool,
        fail_info: bool,
    }

    #[async_trait]
    impl VectorIndex for RecordingIndex {
        async fn upsert(&self, items: Vec<UpsertItem>) -> Result<()> {
            if self.fail_upsert {
                return Err(TwinRagError::VectorStore("boom".to_string()));
            }
            self.upserted.lock().unwrap().extend(items);
            Ok(())
        }

        async fn query(&self, _: &str, _: usize, _: bool) -> Result<Vec<QueryMatch>> {
            Ok(vec![])
        }

        async fn info(&self) -> Result<IndexInfo> {
            if self.fail_info {
                return Err(TwinRagError::VectorStore("boom".to_string()));
            }
            let count = self.upserted.lock().unwrap().len() as u64;
            Ok(IndexInfo {
                vector_count: count,
            })
        }
    }

    #[tokio::test]
    async fn test_upload_builds_enriched_text() {
        let index = RecordingIndex::default();
        let ok = upload_chunks(&index, &[sample_chunk()]).await;
        assert!(ok);

        let items = index.upserted.lock().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "chunk_1");
        assert_eq!(items[0].data, "Personal Profile: Name: Ada");
        assert_eq!(items[0].metadata.title, "Personal Profile");
        assert_eq!(items[0].metadata.content, "Name: Ada");
        assert_eq!(items[0].metadata.category, Category::Personal);
    }

    #[tokio::test]
    async fn test_upload_failure_returns_false() {
        let index = RecordingIndex {
            fail_upsert: true,
            ..RecordingIndex::default()
        };
        assert!(!upload_chunks(&index, &[sample_chunk()]).await);
    }

    #[tokio::test]
    async fn test_verification_failure_returns_false() {
        let index = RecordingIndex {
            fail_info: true,
            ..RecordingIndex::default()
        };
        assert!(!upload_chunks(&index, &[sample_chunk()]).await);
    }
}
