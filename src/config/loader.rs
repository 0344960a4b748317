use std::fs;
use std::path::{Path, PathBuf};

use super::core::SqattConfig;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".sqatt.toml";

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<SqattConfig> {
    let config = toml::from_str::<SqattConfig>(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly requested config file. Errors are not swallowed.
pub fn load_config_from_path(path: &Path) -> Result<SqattConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;
    let config = parse_and_validate_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading config from a discovered path; unreadable or invalid files
/// fall back to defaults with a warning.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<SqattConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}", config_path.display(), e);
            None
        }
    }
}

/// Only log actual errors, not "file not found"
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, nearest first, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.sqatt.toml`
pub fn discover_config(start: PathBuf) -> SqattConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            SqattConfig::default()
        })
}

/// Explicit path if given, otherwise discovery from the current directory
pub fn load_config(explicit: Option<&Path>) -> Result<SqattConfig> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    match std::env::current_dir() {
        Ok(dir) => Ok(discover_config(dir)),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            Ok(SqattConfig::default())
        }
    }
}
