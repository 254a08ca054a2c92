use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Overrides the PostgreSQL URL from the YAML file.
pub const ENV_POSTGRES_URL: &str = "LEADFLOW_POSTGRES_URL";
/// Overrides the storage bucket name from the YAML file.
pub const ENV_STORAGE_BUCKET: &str = "LEADFLOW_STORAGE_BUCKET";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "leadflow.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS. `*` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Request body limit for `/upload_document`, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: default_cors_origins(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

/// Document store settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    #[serde(default)]
    pub postgres_url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            postgres_url: None,
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Local,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

/// Blob storage settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Bucket name used in `gs://{bucket}/...` document paths
    pub bucket: String,
    /// Directory holding bucket contents for the local backend
    pub root_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            bucket: "leadflow-documents".to_string(),
            root_dir: "./data/blobs".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `config/{env}.yaml` and apply environment overrides.
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let mut config = Self::from_file(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_POSTGRES_URL).filter(|v| !v.is_empty()) {
            self.store.postgres_url = Some(url);
        }
        if let Some(bucket) = lookup(ENV_STORAGE_BUCKET).filter(|v| !v.is_empty()) {
            self.storage.bucket = bucket;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
logging:
  log_level: debug
  log_dir: ./logs
  log_file: test.log
  use_json: false
  rotation: never
gateway:
  host: 127.0.0.1
  port: 9000
"#;

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let config = AppConfig::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.gateway.port, 9000);
        assert_eq!(config.gateway.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.storage.backend, StorageBackend::Local);
        assert!(config.store.postgres_url.is_none());
    }

    #[test]
    fn test_backend_sections_parse() {
        let yaml = format!(
            "{MINIMAL}store:\n  backend: postgres\n  postgres_url: postgres://localhost/crm\n  max_connections: 4\n  acquire_timeout_secs: 2\nstorage:\n  backend: memory\n  bucket: crm-bucket\n  root_dir: /tmp/x\n"
        );
        let config = AppConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config.store.backend, StoreBackend::Postgres);
        assert_eq!(config.store.max_connections, 4);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.bucket, "crm-bucket");
    }

    #[test]
    fn test_env_overrides_bucket_and_url() {
        let mut config = AppConfig::from_yaml(MINIMAL).unwrap();
        config.apply_env_overrides(|key| match key {
            ENV_STORAGE_BUCKET => Some("override-bucket".to_string()),
            ENV_POSTGRES_URL => Some("postgres://db/crm".to_string()),
            _ => None,
        });
        assert_eq!(config.storage.bucket, "override-bucket");
        assert_eq!(
            config.store.postgres_url.as_deref(),
            Some("postgres://db/crm")
        );
    }

    #[test]
    fn test_empty_env_value_is_ignored() {
        let mut config = AppConfig::from_yaml(MINIMAL).unwrap();
        config.apply_env_overrides(|_| Some(String::new()));
        assert_eq!(config.storage.bucket, "leadflow-documents");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("Postgres".parse::<StoreBackend>(), Ok(StoreBackend::Postgres));
        assert_eq!("memory".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert!("redis".parse::<StoreBackend>().is_err());
    }
}
