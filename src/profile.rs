//! Profile document persistence: load the source-of-truth JSON file and
//! export the derived chunk list back into it.

use std::path::Path;

use serde_json::Value;

use crate::models::Chunk;
use crate::models::ProfileRecord;
use crate::Result;
use crate::TwinRagError;

/// A profile document held as raw JSON plus its typed view.
///
/// The raw object is kept so the `content_chunks` rewrite preserves fields
/// the typed model doesn't know about.
#[derive(Debug)]
pub struct ProfileDocument {
    raw: serde_json::Map<String, Value>,
    record: ProfileRecord,
}

impl ProfileDocument {
    /// Load the profile document from disk.
    ///
    /// Fatal on a missing file, malformed JSON, or a top level that is not
    /// an object: chunking has nothing to work with in those cases.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TwinRagError::Profile(format!("cannot read {}: {e}", path.display()))
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|e| {
            TwinRagError::Profile(format!("malformed JSON in {}: {e}", path.display()))
        })?;
        Self::from_value(value)
    }

    /// Build a document from an in-memory JSON value (test seam)
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(raw) = value else {
            return Err(TwinRagError::Profile(
                "profile document top level must be a JSON object".to_string(),
            ));
        };
        let record: ProfileRecord = serde_json::from_value(Value::Object(raw.clone()))?;
        Ok(Self { raw, record })
    }

    /// The typed view used by the chunker
    pub fn record(&self) -> &ProfileRecord {
        &self.record
    }

    /// Replace the `content_chunks` field with a freshly derived chunk list.
    ///
    /// The previous list is discarded wholesale; this is an export of the
    /// last chunking run for inspection, not an incremental update.
    pub fn set_chunks(&mut self, chunks: &[Chunk]) -> Result<()> {
        self.raw
            .insert("content_chunks".to_string(), serde_json::to_value(chunks)?);
        Ok(())
    }

    /// Write the document back to disk, pretty-printed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&Value::Object(self.raw.clone()))?;
        std::fs::write(path, json).map_err(|e| {
            TwinRagError::Profile(format!("cannot write {}: {e}", path.display()))
        })?;
        Ok(())
    }
}
