use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

use jot_core::util::is_http_url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub kv: Option<KvRuntimeConfig>,
    pub classifier: Option<ClassifierRuntimeConfig>,
}

/// Hosted KV credentials. Present only when both variables are set; a
/// partially configured pair falls back to the in-memory store.
#[derive(Clone, PartialEq, Eq)]
pub struct KvRuntimeConfig {
    pub rest_api_url: String,
    pub rest_api_token: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct ClassifierRuntimeConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl fmt::Debug for KvRuntimeConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("KvRuntimeConfig")
            .field("rest_api_url", &self.rest_api_url)
            .field("rest_api_token", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Debug for ClassifierRuntimeConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ClassifierRuntimeConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("kv", &self.kv)
            .field("classifier", &self.classifier)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = value_or_default(&lookup, "JOT_API_BIND_ADDR", "127.0.0.1:8080");
        let kv = parse_kv_config(&lookup)?;
        let classifier = parse_classifier_config(&lookup)?;

        Ok(Self {
            bind_addr,
            kv,
            classifier,
        })
    }
}

fn parse_kv_config(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Option<KvRuntimeConfig>, ConfigError> {
    let rest_api_url = optional_trimmed(&lookup, "KV_REST_API_URL");
    let rest_api_token = optional_trimmed(&lookup, "KV_REST_API_TOKEN");

    // Absence of either variable selects the in-memory store.
    let (Some(rest_api_url), Some(rest_api_token)) = (rest_api_url, rest_api_token) else {
        return Ok(None);
    };

    if !is_http_url(&rest_api_url) {
        return Err(ConfigError::Invalid(
            "KV_REST_API_URL must start with http:// or https://".to_string(),
        ));
    }

    Ok(Some(KvRuntimeConfig {
        rest_api_url,
        rest_api_token,
    }))
}

fn parse_classifier_config(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Option<ClassifierRuntimeConfig>, ConfigError> {
    let Some(base_url) = optional_trimmed(&lookup, "CLASSIFIER_BASE_URL") else {
        return Ok(None);
    };

    if !is_http_url(&base_url) {
        return Err(ConfigError::Invalid(
            "CLASSIFIER_BASE_URL must start with http:// or https://".to_string(),
        ));
    }

    let api_key = optional_trimmed(&lookup, "CLASSIFIER_API_KEY");
    let model = value_or_default(&lookup, "CLASSIFIER_MODEL", "gpt-4o-mini");

    let timeout_secs = value_or_default(&lookup, "CLASSIFIER_TIMEOUT_SECS", "30")
        .parse::<u64>()
        .map_err(|_| {
            ConfigError::Invalid("CLASSIFIER_TIMEOUT_SECS must be an integer in [1, 300]".to_string())
        })?;
    if !(1..=300).contains(&timeout_secs) {
        return Err(ConfigError::Invalid(
            "CLASSIFIER_TIMEOUT_SECS must be in [1, 300]".to_string(),
        ));
    }

    Ok(Some(ClassifierRuntimeConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        api_key,
        model,
        timeout: Duration::from_secs(timeout_secs),
    }))
}

fn value_or_default(lookup: impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    optional_trimmed(lookup, name).unwrap_or_else(|| default.to_string())
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(map: &HashMap<&str, &str>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|key| map.get(key).map(|value| (*value).to_string()))
    }

    #[test]
    fn config_defaults_to_memory_store_and_no_classifier() {
        let config = config_from(&HashMap::new()).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert!(config.kv.is_none());
        assert!(config.classifier.is_none());
    }

    #[test]
    fn config_requires_both_kv_variables() {
        let mut map = HashMap::new();
        map.insert("KV_REST_API_URL", "https://kv.example.com");
        let config = config_from(&map).unwrap();
        assert!(config.kv.is_none());

        map.insert("KV_REST_API_TOKEN", "kv-token");
        let config = config_from(&map).unwrap();
        assert!(config.kv.is_some());
    }

    #[test]
    fn config_rejects_non_http_kv_url() {
        let mut map = HashMap::new();
        map.insert("KV_REST_API_URL", "redis://kv.example.com");
        map.insert("KV_REST_API_TOKEN", "kv-token");
        assert!(config_from(&map).is_err());
    }

    #[test]
    fn config_rejects_out_of_range_classifier_timeout() {
        let mut map = HashMap::new();
        map.insert("CLASSIFIER_BASE_URL", "https://api.example.com/v1");
        map.insert("CLASSIFIER_TIMEOUT_SECS", "0");
        assert!(config_from(&map).is_err());
    }

    #[test]
    fn config_redacts_sensitive_debug_fields() {
        let mut map = HashMap::new();
        map.insert("KV_REST_API_URL", "https://kv.example.com");
        map.insert("KV_REST_API_TOKEN", "sensitive-kv-token");
        map.insert("CLASSIFIER_BASE_URL", "https://api.example.com/v1");
        map.insert("CLASSIFIER_API_KEY", "sensitive-api-key");

        let config = config_from(&map).unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("sensitive-kv-token"));
        assert!(!debug_output.contains("sensitive-api-key"));
        assert!(debug_output.contains("[REDACTED]"));
    }

    #[test]
    fn config_trims_classifier_base_url() {
        let mut map = HashMap::new();
        map.insert("CLASSIFIER_BASE_URL", "https://api.example.com/v1/");
        let config = config_from(&map).unwrap();
        assert_eq!(
            config.classifier.unwrap().base_url,
            "https://api.example.com/v1"
        );
    }
}
