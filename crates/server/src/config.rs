use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Byte Shop server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP binding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Storage backend: "sqlite" or "memory"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Path to `SQLite` database file (only used when backend = "sqlite")
    #[serde(default = "default_database_path")]
    pub path: PathBuf,

    /// Maximum number of pooled `SQLite` connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Enable `SQLite` write-ahead logging
    #[serde(default = "default_enable_wal")]
    pub enable_wal: bool,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_backend() -> String {
    "sqlite".to_string()
}

fn default_database_path() -> PathBuf {
    if cfg!(debug_assertions) {
        PathBuf::from("./byteshop.db")
    } else {
        PathBuf::from("/var/lib/byteshop/byteshop.db")
    }
}

fn default_max_connections() -> u32 {
    byteshop_db::DatabaseConfig::default().max_connections
}

fn default_enable_wal() -> bool {
    byteshop_db::DatabaseConfig::default().enable_wal
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_database_path(),
            max_connections: default_max_connections(),
            enable_wal: default_enable_wal(),
        }
    }
}

impl DatabaseConfig {
    /// Pool settings for the `SQLite` backend
    #[must_use]
    pub fn pool_config(&self) -> byteshop_db::DatabaseConfig {
        byteshop_db::DatabaseConfig {
            max_connections: self.max_connections,
            enable_wal: self.enable_wal,
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::info!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from default locations in order:
    /// 1. ./byteshop.toml (current directory)
    /// 2. /etc/byteshop/config.toml (system-wide)
    /// 3. Built-in defaults
    pub fn load_default() -> Result<Self> {
        let paths = [
            PathBuf::from("./byteshop.toml"),
            PathBuf::from("/etc/byteshop/config.toml"),
        ];

        for path in paths {
            if path.exists() {
                return Self::load(&path);
            }
        }

        tracing::info!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Address to bind the HTTP listener to
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }

    /// Generate example configuration file
    pub fn example() -> Result<String> {
        toml::to_string_pretty(&Config::default()).context("Failed to serialize example config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = Config::load(dir.path().join("nope.toml"))?;

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.backend, "sqlite");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.enable_wal);
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("byteshop.toml");
        std::fs::write(
            &path,
            "[server]\nport = 8080\n\n[database]\nbackend = \"memory\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.database.backend, "memory");
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        Ok(())
    }

    #[test]
    fn test_invalid_file_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("byteshop.toml");
        std::fs::write(&path, "[server]\nport = \"not a number\"\n")?;

        assert!(Config::load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_example_parses_back() -> Result<()> {
        let example = Config::example()?;
        let parsed: Config = toml::from_str(&example)?;

        assert_eq!(parsed.server.port, 3000);
        assert_eq!(parsed.database.path, default_database_path());
        Ok(())
    }
}
