use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure loaded from askviz.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub client: ClientConfig,
    pub chart: ChartOutputConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Endpoint and request behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    /// Default for the visualize toggle when the CLI flag is not given
    pub visualize: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/ask".to_string(),
            timeout_ms: 120_000,
            visualize: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartOutputConfig {
    /// Where the chart configuration JSON is written
    pub output: PathBuf,
}

impl Default for ChartOutputConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("chart.json"),
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "askviz=info".to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn load_from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "askviz=info".to_string()),
        }
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    if v == "1" || v.eq_ignore_ascii_case("true") {
        Some(true)
    } else if v == "0" || v.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses ASKVIZ_CONFIG environment variable or defaults to "askviz.toml"
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(env_path) = std::env::var("ASKVIZ_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }

        let config_path =
            std::env::var("ASKVIZ_CONFIG").unwrap_or_else(|_| "askviz.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            toml::from_str(&content)?
        } else {
            tracing::debug!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.runtime = RuntimeConfig::load_from_env();

        config.validate()?;
        Ok(config)
    }

    /// Apply env-first overrides. `lookup` is `std::env::var` outside tests.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("ASKVIZ_ENDPOINT") {
            tracing::debug!("ASKVIZ_ENDPOINT env override applied");
            self.client.endpoint = endpoint;
        }
        if let Some(timeout) = lookup("ASKVIZ_TIMEOUT_MS").and_then(|v| v.parse::<u64>().ok()) {
            self.client.timeout_ms = timeout;
        }
        if let Some(visualize) = lookup("ASKVIZ_VISUALIZE").and_then(|v| parse_bool(&v)) {
            self.client.visualize = visualize;
        }
        if let Some(out) = lookup("ASKVIZ_CHART_OUT") {
            self.chart.output = PathBuf::from(out);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let endpoint = &self.client.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            anyhow::bail!(
                "Endpoint '{}' must start with http:// or https://",
                endpoint
            );
        }
        if self.client.timeout_ms == 0 {
            anyhow::bail!("ASKVIZ_TIMEOUT_MS must be > 0");
        }
        if self.chart.output.as_os_str().is_empty() {
            anyhow::bail!("chart output path must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [client]
            endpoint = "https://example.test/ask"
            "#,
        )
        .unwrap();
        assert_eq!(config.client.endpoint, "https://example.test/ask");
        assert_eq!(config.client.timeout_ms, 120_000);
        assert_eq!(config.chart.output, PathBuf::from("chart.json"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("ASKVIZ_ENDPOINT", "http://10.0.0.2:8000/ask"),
            ("ASKVIZ_TIMEOUT_MS", "2500"),
            ("ASKVIZ_VISUALIZE", "TRUE"),
            ("ASKVIZ_CHART_OUT", "/tmp/out.json"),
        ]);
        let mut config = Config::default();
        config.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.client.endpoint, "http://10.0.0.2:8000/ask");
        assert_eq!(config.client.timeout_ms, 2500);
        assert!(config.client.visualize);
        assert_eq!(config.chart.output, PathBuf::from("/tmp/out.json"));
    }

    #[test]
    fn test_unparseable_overrides_ignored() {
        let mut config = Config::default();
        config.apply_env_overrides(|k| match k {
            "ASKVIZ_TIMEOUT_MS" => Some("soon".to_string()),
            "ASKVIZ_VISUALIZE" => Some("maybe".to_string()),
            _ => None,
        });
        assert_eq!(config.client.timeout_ms, 120_000);
        assert!(!config.client.visualize);
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.client.endpoint = "ws://127.0.0.1/ask".to_string();
        assert!(config.validate().is_err());

        config.client.endpoint = "http://127.0.0.1/ask".to_string();
        config.client.timeout_ms = 0;
        assert!(config.validate().is_err());
    }
}
