use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

/// Vector-search collaborator settings.
///
/// The REST URL and token are required; `load()` fails before any network
/// activity when they are missing. Both can be supplied through the
/// `VECTOR_REST_URL` / `VECTOR_REST_TOKEN` environment variables instead of
/// the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorConfig {
    #[serde(default)]
    pub rest_url: String,
    #[serde(default)]
    pub rest_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub llm_endpoint: String,
    #[serde(default)]
    pub llm_key: String,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
}

fn default_llm_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

/// Cache collaborator settings. Entirely optional: when the URL or token is
/// absent the cache degrades to always-miss behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub rest_url: String,
    #[serde(default)]
    pub rest_token: String,
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            rest_url: String::new(),
            rest_token: String::new(),
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f32,
}

fn default_top_k() -> usize {
    3
}

fn default_score_threshold() -> f32 {
    0.7
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            score_threshold: default_score_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub backtrace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_profile_path")]
    pub path: String,
}

fn default_profile_path() -> String {
    "data/digitaltwin.json".to_string()
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            path: default_profile_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub vector: VectorConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            rest_url: String::new(),
            rest_token: String::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default config file path and apply
    /// environment overrides, without validating credentials (used by the
    /// config display command).
    pub fn resolve() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        let mut config = if Path::new("config.toml").exists() {
            Self::from_file("config.toml")?
        } else if Path::new("config.example.toml").exists() {
            println!(
                "Warning: Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")?
        } else {
            return Err(crate::TwinRagError::Config(
                "No config file found. Please create config.toml or config.example.toml"
                    .to_string(),
            ));
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Resolve configuration and validate required credentials. This is the
    /// startup path: it fails before any network activity when the vector or
    /// LLM credentials are missing.
    pub fn load() -> crate::Result<Self> {
        let config = Self::resolve()?;
        config.validate()?;
        Ok(config)
    }

    /// Environment variables take precedence over file values so credentials
    /// can stay out of the config file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("VECTOR_REST_URL") {
            self.vector.rest_url = url;
        }
        if let Ok(token) = std::env::var("VECTOR_REST_TOKEN") {
            self.vector.rest_token = token;
        }
        if let Ok(key) = std::env::var("LLM_API_KEY") {
            self.llm.llm_key = key;
        }
        if let Ok(url) = std::env::var("CACHE_REST_URL") {
            self.cache.rest_url = url;
        }
        if let Ok(token) = std::env::var("CACHE_REST_TOKEN") {
            self.cache.rest_token = token;
        }
    }

    /// Missing vector-search or LLM credentials halt startup; missing cache
    /// credentials only disable the cache.
    pub fn validate(&self) -> crate::Result<()> {
        if self.vector.rest_url.is_empty() || self.vector.rest_token.is_empty() {
            return Err(crate::TwinRagError::Config(
                "Vector credentials not configured. Set [vector] rest_url/rest_token or \
                 VECTOR_REST_URL/VECTOR_REST_TOKEN"
                    .to_string(),
            ));
        }
        if self.llm.llm_key.is_empty() {
            return Err(crate::TwinRagError::Config(
                "LLM API key not configured. Set [llm] llm_key or LLM_API_KEY".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the optional cache collaborator is configured
    pub fn cache_enabled(&self) -> bool {
        !self.cache.rest_url.is_empty() && !self.cache.rest_token.is_empty()
    }

    /// Get LLM endpoint
    pub fn llm_endpoint(&self) -> &str {
        &self.llm.llm_endpoint
    }

    /// Get LLM key
    pub fn llm_key(&self) -> &str {
        &self.llm.llm_key
    }

    /// Get LLM model
    pub fn llm_model(&self) -> &str {
        &self.llm.llm_model
    }

    /// Get retrieval result count
    pub fn top_k(&self) -> usize {
        self.retrieval.top_k
    }

    /// Get relevance threshold for retrieved context
    pub fn score_threshold(&self) -> f32 {
        self.retrieval.score_threshold
    }

    /// Get profile document path
    pub fn profile_path(&self) -> &str {
        &self.profile.path
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vector: VectorConfig::default(),
            llm: LlmConfig {
                llm_endpoint: "https://api.groq.com/openai/v1".to_string(),
                llm_key: String::new(),
                llm_model: default_llm_model(),
            },
            cache: CacheConfig::default(),
            retrieval: RetrievalConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                backtrace: true,
            },
            profile: ProfileConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ====== Default Value Tests ======

    #[test]
    fn test_retrieval_defaults() {
        let config = RetrievalConfig::default();
        assert_eq!(config.top_k, 3);
        assert!((config.score_threshold - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cache_config_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl_secs, 300);
        assert!(config.rest_url.is_empty());
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.llm_model(), "llama-3.1-8b-instant");
        assert!(config.llm_endpoint().contains("groq"));
        assert_eq!(config.top_k(), 3);
        assert_eq!(config.profile_path(), "data/digitaltwin.json");
        assert!(!config.cache_enabled());
    }

    // ====== Validation Tests ======

    #[test]
    fn test_validate_requires_vector_credentials() {
        let config = AppConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Vector credentials"));
    }

    #[test]
    fn test_validate_requires_llm_key() {
        let mut config = AppConfig::default();
        config.vector.rest_url = "https://vector.example.com".to_string();
        config.vector.rest_token = "token".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("LLM API key"));
    }

    #[test]
    fn test_validate_passes_with_credentials() {
        let mut config = AppConfig::default();
        config.vector.rest_url = "https://vector.example.com".to_string();
        config.vector.rest_token = "token".to_string();
        config.llm.llm_key = "key".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cache_enabled_requires_both_values() {
        let mut config = AppConfig::default();
        config.cache.rest_url = "https://cache.example.com".to_string();
        assert!(!config.cache_enabled());
        config.cache.rest_token = "token".to_string();
        assert!(config.cache_enabled());
    }

    // ====== Parsing Tests ======

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
            [llm]
            llm_endpoint = "http://localhost:11434/v1"

            [logging]
            level = "debug"
            backtrace = false
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm_model(), "llama-3.1-8b-instant");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.top_k(), 3);
    }
}
