//! Vector-search collaborator: abstract contract plus the hosted REST
//! implementation and the chunk uploader.
//!
//! The collaborator embeds text server-side; callers never compute or supply
//! a numeric vector.

pub mod client;
pub mod upload;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::models::Category;
use crate::models::ChunkType;
use crate::Result;

pub use client::VectorRestClient;
pub use upload::upload_chunks;

/// Display attributes stored alongside each vector and returned with query
/// matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorAttributes {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ChunkType,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
}

/// One item of a batch upsert: the text is embedded by the collaborator
#[derive(Debug, Clone, Serialize)]
pub struct UpsertItem {
    pub id: String,
    pub data: String,
    pub metadata: VectorAttributes,
}

/// One nearest-neighbor match
#[derive(Debug, Clone, Deserialize)]
pub struct QueryMatch {
    pub id: String,
    pub score: f32,
    #[serde(default)]
    pub metadata: Option<VectorAttributes>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IndexInfo {
    #[serde(rename = "vectorCount")]
    pub vector_count: u64,
}

/// Abstract vector-search collaborator.
///
/// Implemented by [`VectorRestClient`] for the hosted service and by
/// deterministic stubs in tests.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Submit a batch of items for embedding and storage
    async fn upsert(&self, items: Vec<UpsertItem>) -> Result<()>;

    /// Nearest-neighbor query over the raw query text
    async fn query(
        &self,
        text: &str,
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<QueryMatch>>;

    /// Collection statistics (used for upload verification)
    async fn info(&self) -> Result<IndexInfo>;
}
