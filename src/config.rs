use crate::error::{GuideError, Result};
use crate::resolver::AlternateNameTable;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON seed file loaded at start-up.
    pub seed_file: Option<PathBuf>,
    /// Where the dataset is written after each mutation.
    pub snapshot_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
        }
    }
}

/// Extra alternate names, merged over the built-in table.
///
/// ```toml
/// [resolver.aliases]
/// "Cabo Verde" = ["Cape Verde"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl ResolverConfig {
    pub fn alternate_names(&self) -> AlternateNameTable {
        AlternateNameTable::builtin().with_entries(
            self.aliases
                .iter()
                .map(|(name, aliases)| (name.clone(), aliases.clone())),
        )
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read `path` if it exists, otherwise start from defaults. Environment
    /// overrides are applied either way.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                GuideError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `PORT`, `TRAVEL_HOST`, `TRAVEL_SEED_FILE`, `TRAVEL_SNAPSHOT_FILE`,
    /// `TRAVEL_ALLOWED_ORIGIN` and `TRAVEL_LOG_DIR`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| GuideError::Config(format!("PORT is not a valid port: '{port}'")))?;
        }
        if let Some(host) = var("TRAVEL_HOST") {
            self.server.host = host;
        }
        if let Some(origin) = var("TRAVEL_ALLOWED_ORIGIN") {
            self.server.allowed_origin = origin;
        }
        if let Some(seed) = var("TRAVEL_SEED_FILE") {
            self.storage.seed_file = Some(PathBuf::from(seed));
        }
        if let Some(snapshot) = var("TRAVEL_SNAPSHOT_FILE") {
            self.storage.snapshot_file = Some(PathBuf::from(snapshot));
        }
        if let Some(dir) = var("TRAVEL_LOG_DIR") {
            self.logging.directory = PathBuf::from(dir);
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
