use thiserror::Error;

#[derive(Error, Debug)]
pub enum TwinRagError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Profile document error: {0}")]
    Profile(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TwinRagError>;
