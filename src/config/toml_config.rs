use crate::adapters::http::DEFAULT_TIMEOUT_SECONDS;
use crate::config::DEFAULT_LOOKUP_ENDPOINT;
use crate::core::persistence::PRODUCTS_STORAGE_KEY;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub lookup: LookupConfig,
    pub session: Option<SessionConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub homologation: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub directory: Option<String>,
    pub storage_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SEFAZ_PROXY_URL})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn lookup_endpoint(&self) -> &str {
        self.lookup
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_LOOKUP_ENDPOINT)
    }

    fn timeout_seconds(&self) -> u64 {
        self.lookup.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn homologation(&self) -> bool {
        self.lookup.homologation.unwrap_or(false)
    }

    fn session_dir(&self) -> Option<&str> {
        self.session.as_ref()?.directory.as_deref()
    }

    fn storage_key(&self) -> &str {
        self.session
            .as_ref()
            .and_then(|s| s.storage_key.as_deref())
            .unwrap_or(PRODUCTS_STORAGE_KEY)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::config::validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[lookup]
endpoint = "https://relay.example.com/sat-proxy"
timeout_seconds = 10
homologation = true

[session]
directory = "/tmp/compra-facil"
storage_key = "lista"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.lookup_endpoint(), "https://relay.example.com/sat-proxy");
        assert_eq!(config.timeout_seconds(), 10);
        assert!(config.homologation());
        assert_eq!(config.session_dir(), Some("/tmp/compra-facil"));
        assert_eq!(config.storage_key(), "lista");
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("[lookup]\n").unwrap();

        assert_eq!(config.lookup_endpoint(), DEFAULT_LOOKUP_ENDPOINT);
        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert!(!config.homologation());
        assert_eq!(config.session_dir(), None);
        assert_eq!(config.storage_key(), "products");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COMPRA_FACIL_TEST_ENDPOINT", "https://proxy.test/sat-proxy");

        let toml_content = r#"
[lookup]
endpoint = "${COMPRA_FACIL_TEST_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.lookup_endpoint(), "https://proxy.test/sat-proxy");

        std::env::remove_var("COMPRA_FACIL_TEST_ENDPOINT");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[lookup]
endpoint = "${COMPRA_FACIL_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.lookup_endpoint(), "${COMPRA_FACIL_UNSET_VARIABLE}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[lookup]
endpoint = "https://relay.example.com"

[session]
storage_key = "  "
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[lookup\nendpoint = ");
        assert!(matches!(result, Err(AppError::ConfigValidationError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[lookup]
endpoint = "https://relay.example.com/sat-proxy"

[session]
directory = "./sessao"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.session_dir(), Some("./sessao"));
    }
}
