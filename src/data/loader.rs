//! RON config loader
//!
//! Loads the engine config from a RON file, with fallback to hardcoded defaults.

use std::fs;
use std::path::{Path, PathBuf};

use super::config::{ConfigError, EngineConfig};

pub const CONFIG_FILE: &str = "engine.ron";

/// Local asset location, relative to the working directory
pub fn asset_config_path() -> PathBuf {
    Path::new("assets/data").join(CONFIG_FILE)
}

/// Per-user config location
pub fn user_config_path() -> Option<PathBuf> {
    use directories::ProjectDirs;

    ProjectDirs::from("com", "relicforge", "Relicforge").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Parse and validate a config from RON text
pub fn parse(content: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = ron::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load a config file
pub fn load(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse(&content)?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load from `path`, warning and falling back to defaults on any failure
pub fn load_or_default(path: &Path) -> EngineConfig {
    load(path).unwrap_or_else(|e| {
        log::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
        EngineConfig::default()
    })
}

/// Find a config: the local asset file first, then the per-user one, then defaults
pub fn discover() -> EngineConfig {
    let candidates = std::iter::once(asset_config_path()).chain(user_config_path());
    for path in candidates {
        if path.exists() {
            return load_or_default(&path);
        }
    }
    log::warn!("No {} found. Using defaults.", CONFIG_FILE);
    EngineConfig::default()
}

/// Write the default config out as pretty RON, creating parent directories
pub fn export_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let config = EngineConfig::default();
    let content = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default())?;
    fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
