//! Configuration for longbox.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variable (LONGBOX_DATA)
//! 2. Config file (.longbox/config.yaml)
//! 3. Default (./data)
//!
//! Config file discovery:
//! - Searches current directory and parents for .longbox/config.yaml
//! - Paths in config file are relative to the project root (the parent of .longbox/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::DEFAULT_LIMIT;
use crate::validate::{ValidatorConfig, DEFAULT_MAX_ERA_DISTANCE};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub validator: Option<ValidatorSection>,
    #[serde(default)]
    pub recommend: Option<RecommendSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Snapshot data directory (relative to project root)
    pub data: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidatorSection {
    pub max_era_distance: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendSection {
    pub limit: Option<usize>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory holding the snapshot JSON files
    pub data_dir: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    pub validator: ValidatorConfig,
    /// Number of recommendations to return
    pub recommend_limit: usize,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".longbox").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
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

/// Resolve configuration from a parsed file (if any) plus environment
fn resolve(config_file: Option<(PathBuf, ConfigFile)>) -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    let env_data = std::env::var("LONGBOX_DATA").ok().map(PathBuf::from);

    let Some((config_path, config)) = config_file else {
        return Ok(ResolvedConfig {
            data_dir: env_data.unwrap_or_else(|| cwd.join("data")),
            config_file: None,
            validator: ValidatorConfig::default(),
            recommend_limit: DEFAULT_LIMIT,
        });
    };

    // Base directory is the parent of .longbox/ (i.e., grandparent of config.yaml)
    let base_dir = config_path
        .parent()
        .and_then(|p| p.parent())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let data_dir = env_data
        .or_else(|| config.paths.data.as_deref().map(|d| resolve_path(&base_dir, d)))
        .unwrap_or_else(|| base_dir.join("data"));

    let validator = ValidatorConfig {
        max_era_distance: config
            .validator
            .as_ref()
            .and_then(|v| v.max_era_distance)
            .unwrap_or(DEFAULT_MAX_ERA_DISTANCE),
    };

    let recommend_limit = config
        .recommend
        .as_ref()
        .and_then(|r| r.limit)
        .unwrap_or(DEFAULT_LIMIT);

    Ok(ResolvedConfig {
        data_dir,
        config_file: Some(config_path),
        validator,
        recommend_limit,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = match find_config_file() {
        Some(path) => {
            let parsed = load_config_file(&path)?;
            Some((path, parsed))
        }
        None => None,
    };

    resolve(config_file)
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let dot_dir = temp.path().join(".longbox");
        std::fs::create_dir_all(&dot_dir).unwrap();

        let config_path = dot_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  data: web/data
validator:
  max_era_distance: 5
recommend:
  limit: 20
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.data, Some("web/data".to_string()));
        assert_eq!(config.validator.unwrap().max_era_distance, Some(5));
        assert_eq!(config.recommend.unwrap().limit, Some(20));
    }

    #[test]
    fn test_resolve_from_file_applies_sections() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(".longbox").join("config.yaml");
        let file = ConfigFile {
            version: "1.0".to_string(),
            paths: PathsConfig {
                data: Some("/srv/longbox/data".to_string()),
            },
            validator: Some(ValidatorSection {
                max_era_distance: Some(2),
            }),
            recommend: None,
        };

        let resolved = resolve(Some((config_path.clone(), file))).unwrap();
        if std::env::var("LONGBOX_DATA").is_err() {
            assert_eq!(resolved.data_dir, PathBuf::from("/srv/longbox/data"));
        }
        assert_eq!(resolved.validator.max_era_distance, 2);
        assert_eq!(resolved.recommend_limit, DEFAULT_LIMIT);
        assert_eq!(resolved.config_file, Some(config_path));
    }

    #[test]
    fn test_resolve_without_file_uses_defaults() {
        let resolved = resolve(None).unwrap();
        assert!(resolved.config_file.is_none());
        assert_eq!(resolved.validator.max_era_distance, DEFAULT_MAX_ERA_DISTANCE);
        if std::env::var("LONGBOX_DATA").is_err() {
            let cwd = std::env::current_dir().unwrap();
            assert_eq!(resolved.data_dir, cwd.join("data"));
        }
    }

    #[test]
    fn test_reload_matches_cached() {
        let cached = config().unwrap();
        let reloaded = reload_config().unwrap();
        assert_eq!(cached.data_dir, reloaded.data_dir);
        assert_eq!(cached.recommend_limit, reloaded.recommend_limit);
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
