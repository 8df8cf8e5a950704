use super::types::Config;
use std::fs;
use std::path::Path;
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

/// 启动时加载一次配置，之后只读
pub struct ConfigManager {
    config: Config,
    config_path: String,
}

impl ConfigManager {
    /// 读取 YAML（文件不存在时使用默认值），再叠加环境变量并校验
    pub fn new(config_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = Self::load_config(config_path)?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        validate(&config)?;

        info!("Configuration loaded from {}", config_path);
        Ok(ConfigManager {
            config,
            config_path: config_path.to_string(),
        })
    }

    pub fn load_config(config_path: &str) -> Result<Config, Box<dyn std::error::Error>> {
        if !Path::new(config_path).exists() {
            info!(
                "Config file {} not found, using defaults and environment",
                config_path
            );
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(config_path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> &str {
        &self.config_path
    }
}

/// 环境变量优先级高于配置文件
///
/// 支持：`ANALYSIS_SERVICE_URL`、`MUX_TOKEN_ID`、`MUX_TOKEN_SECRET`、`MUX_BASE_URL`、`SERVER_PORT`
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("ANALYSIS_SERVICE_URL") {
        config.analysis.base_url = url;
    }
    if let Some(id) = lookup("MUX_TOKEN_ID") {
        config.mux.token_id = id;
    }
    if let Some(secret) = lookup("MUX_TOKEN_SECRET") {
        config.mux.token_secret = secret;
    }
    if let Some(url) = lookup("MUX_BASE_URL") {
        config.mux.base_url = url;
    }
    if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.parse().ok()) {
        config.server.port = port;
    }
}

pub fn validate(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut missing = Vec::new();
    if config.analysis.base_url.trim().is_empty() {
        missing.push("analysis.base_url (ANALYSIS_SERVICE_URL)");
    }
    if config.mux.token_id.is_empty() {
        missing.push("mux.token_id (MUX_TOKEN_ID)");
    }
    if config.mux.token_secret.is_empty() {
        missing.push("mux.token_secret (MUX_TOKEN_SECRET)");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("Missing required configuration: {}", missing.join(", ")).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str(
            r#"
analysis:
  base_url: "http://analysis:8001"
mux:
  token_id: "id"
  token_secret: "secret"
"#,
        )
        .unwrap();
        assert_eq!(config.analysis.timeout_secs, 180);
        assert_eq!(config.mux.base_url, "https://api.mux.com");
        assert_eq!(config.mux.cors_origin, "*");
        assert_eq!(config.server.port, 8000);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = Config::default();
        config.analysis.base_url = "http://from-file".to_string();
        let vars = env(&[
            ("ANALYSIS_SERVICE_URL", "http://from-env"),
            ("MUX_TOKEN_ID", "tid"),
            ("MUX_TOKEN_SECRET", "tsecret"),
            ("SERVER_PORT", "9100"),
        ]);
        apply_env_overrides(&mut config, |k| vars.get(k).cloned());

        assert_eq!(config.analysis.base_url, "http://from-env");
        assert_eq!(config.mux.token_id, "tid");
        assert_eq!(config.mux.token_secret, "tsecret");
        assert_eq!(config.server.port, 9100);
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        let mut config = Config::default();
        let vars = env(&[("SERVER_PORT", "not-a-port")]);
        apply_env_overrides(&mut config, |k| vars.get(k).cloned());
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let err = validate(&Config::default()).unwrap_err().to_string();
        assert!(err.contains("ANALYSIS_SERVICE_URL"));
        assert!(err.contains("MUX_TOKEN_ID"));
        assert!(err.contains("MUX_TOKEN_SECRET"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = ConfigManager::load_config("does/not/exist.yaml").unwrap();
        assert_eq!(config.server.port, 8000);
    }
}
