pub mod cache;
pub mod chunker;
pub mod cli;
pub mod config;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod profile;
pub mod rag;
pub mod vector;

pub use config::AppConfig;
pub use errors::*;
