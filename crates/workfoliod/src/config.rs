//! workfolio.toml configuration parser.
//!
//! Every section and key is optional; missing values fall back to the
//! defaults below. CLI flags are applied on top by `main`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use workfolio_web::WebSettings;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkfolioConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub pagination: PaginationConfig,
    pub registration: RegistrationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("/var/lib/workfolio"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub page_size: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { page_size: 2 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Random ids are drawn from `[0, id_bound)`.
    pub id_bound: i32,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self { id_bound: 198 }
    }
}

impl WorkfolioConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: WorkfolioConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.pagination.page_size >= 1,
            "pagination.page_size must be at least 1, got {}",
            self.pagination.page_size
        );
        anyhow::ensure!(
            self.registration.id_bound >= 1,
            "registration.id_bound must be at least 1, got {}",
            self.registration.id_bound
        );
        Ok(())
    }

    pub fn db_path(&self) -> PathBuf {
        self.storage.data_dir.join("workfolio.redb")
    }

    pub fn web_settings(&self) -> WebSettings {
        WebSettings {
            page_size: self.pagination.page_size,
            id_bound: self.registration.id_bound,
        }
    }
}
