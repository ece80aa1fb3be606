use tracing::warn;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Process configuration, read once at startup and passed down explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub cors: CorsConfig,
    pub ragflow: RagflowConfig,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorsConfig {
    /// Empty means every origin is accepted.
    pub allowed_origins: Vec<String>,
}

/// Where and how to reach the backend service. Empty strings mean "unset".
#[derive(Clone, PartialEq)]
pub struct RagflowConfig {
    pub base_url: String,
    pub api_key: String,
    pub query_path: String,
    pub datasets_path: String,
    pub timeout_ms: u64,
}

impl Default for RagflowConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            query_path: String::new(),
            datasets_path: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl std::fmt::Debug for RagflowConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagflowConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "[REDACTED]" })
            .field("query_path", &self.query_path)
            .field("datasets_path", &self.datasets_path)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl AppConfig {
    /// Load from the process environment, after applying a `.env` file if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok());

        if config.ragflow.base_url.is_empty() {
            warn!("RAGFLOW_BASE_URL is not configured. RAGFlow requests will fail until it is set.");
        }
        if config.ragflow.query_path.is_empty() {
            warn!("RAGFLOW_QUERY_PATH is not configured. Update your environment to enable RAGFlow queries.");
        }

        config
    }

    /// Build from an arbitrary variable source. Unparseable numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).unwrap_or_default();

        Self {
            port: var("PORT").trim().parse().unwrap_or(DEFAULT_PORT),
            cors: CorsConfig {
                allowed_origins: parse_allowed_origins(&var("CORS_ALLOWED_ORIGINS")),
            },
            ragflow: RagflowConfig {
                base_url: var("RAGFLOW_BASE_URL"),
                api_key: var("RAGFLOW_API_KEY"),
                query_path: var("RAGFLOW_QUERY_PATH"),
                datasets_path: var("RAGFLOW_DATASETS_PATH"),
                timeout_ms: var("RAGFLOW_TIMEOUT").trim().parse().unwrap_or(DEFAULT_TIMEOUT_MS),
            },
        }
    }
}

fn parse_allowed_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.cors.allowed_origins.is_empty());
        assert_eq!(config.ragflow, RagflowConfig::default());
        assert_eq!(config.ragflow.timeout_ms, 30_000);
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("CORS_ALLOWED_ORIGINS", " http://a.test , ,http://b.test"),
            ("RAGFLOW_BASE_URL", "http://ragflow:9380"),
            ("RAGFLOW_API_KEY", "secret"),
            ("RAGFLOW_QUERY_PATH", "/api/v1/retrieval"),
            ("RAGFLOW_DATASETS_PATH", "/api/v1/datasets"),
            ("RAGFLOW_TIMEOUT", "1500"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors.allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.ragflow.base_url, "http://ragflow:9380");
        assert_eq!(config.ragflow.api_key, "secret");
        assert_eq!(config.ragflow.query_path, "/api/v1/retrieval");
        assert_eq!(config.ragflow.datasets_path, "/api/v1/datasets");
        assert_eq!(config.ragflow.timeout_ms, 1500);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config =
            AppConfig::from_lookup(lookup(&[("PORT", "eighty"), ("RAGFLOW_TIMEOUT", "-5")]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.ragflow.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let ragflow = RagflowConfig {
            api_key: "super-secret".into(),
            ..Default::default()
        };
        let rendered = format!("{ragflow:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
