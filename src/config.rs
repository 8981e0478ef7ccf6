//! Configuration for audiolib.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (AUDIOLIB_STORE, AUDIOLIB_LOG)
//! 2. Config file (.audiolib/config.yaml)
//! 3. Defaults (bundled demo store, `warn` logging)
//!
//! Config file discovery:
//! - Searches current directory and parents for .audiolib/config.yaml
//! - Falls back to ~/.audiolib/config.yaml
//! - Paths in config file are relative to the config file's project root

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    /// Store catalog (relative to the project root)
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub log: Option<LogConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Default tracing filter when RUST_LOG is unset
    pub level: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Store catalog to load (bundled demo catalog if None)
    pub store: Option<PathBuf>,
    /// Default tracing filter
    pub log_level: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Values read from the environment
#[derive(Debug, Clone, Default)]
struct EnvOverrides {
    store: Option<String>,
    log: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            store: std::env::var("AUDIOLIB_STORE").ok(),
            log: std::env::var("AUDIOLIB_LOG").ok(),
        }
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".audiolib").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Find config file from the current directory, then the home directory
fn find_config_file() -> Option<PathBuf> {
    let from_cwd = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_file_from(&cwd));

    from_cwd.or_else(|| {
        let home = dirs::home_dir()?.join(".audiolib").join("config.yaml");
        home.exists().then_some(home)
    })
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Combine config file and environment into a resolved configuration
fn resolve(config_file: Option<PathBuf>, env: EnvOverrides) -> Result<ResolvedConfig> {
    let file = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    let store = if let Some(env_store) = env.store {
        Some(PathBuf::from(env_store))
    } else if let (Some(path), Some(store)) = (
        config_file.as_ref(),
        file.as_ref().and_then(|f| f.store.as_ref()),
    ) {
        // Project root is the parent of .audiolib/
        let base_dir = path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));
        Some(resolve_path(base_dir, store))
    } else {
        None
    };

    let log_level = env
        .log
        .or_else(|| {
            file.as_ref()
                .and_then(|f| f.log.as_ref())
                .and_then(|l| l.level.clone())
        })
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    Ok(ResolvedConfig {
        store,
        log_level,
        config_file,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    resolve(find_config_file(), EnvOverrides::from_env())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
