//! Configuration from the environment.
//!
//! `.env` is loaded by the binary before [`GridConfig::from_env`] runs.
//!
//! | Variable                 | Default                        |
//! |--------------------------|--------------------------------|
//! | `SPARK_GRID_ENDPOINT`    | `http://localhost:4000/users`  |
//! | `SPARK_GRID_PAGE_SIZE`   | `10`                           |
//! | `SPARK_GRID_DELETE_MODE` | `alias-edit`                   |
//! | `SPARK_GRID_LOG_DIR`     | system temp dir                |
//! | `SPARK_GRID_LOG`         | `spark_grid=info`              |

use std::path::PathBuf;

use crate::error::ConfigError;

pub const ENDPOINT_VAR: &str = "SPARK_GRID_ENDPOINT";
pub const PAGE_SIZE_VAR: &str = "SPARK_GRID_PAGE_SIZE";
pub const DELETE_MODE_VAR: &str = "SPARK_GRID_DELETE_MODE";
pub const LOG_DIR_VAR: &str = "SPARK_GRID_LOG_DIR";
pub const LOG_FILTER_VAR: &str = "SPARK_GRID_LOG";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/users";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_LOG_FILTER: &str = "spark_grid=info";

/// What the Delete control does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Delete behaves exactly like Edit and removes nothing.
    #[default]
    AliasEdit,
    /// Delete removes the record from the store after confirmation.
    Remove,
}

impl DeleteMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "alias-edit" | "alias_edit" | "edit" => Some(Self::AliasEdit),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }
}

/// Behavior knobs of the grid itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub page_size: usize,
    pub delete_mode: DeleteMode,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            delete_mode: DeleteMode::AliasEdit,
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub endpoint: String,
    pub grid: GridOptions,
    pub log_dir: PathBuf,
    pub log_filter: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            grid: GridOptions::default(),
            log_dir: std::env::temp_dir(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl GridConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            let endpoint = endpoint.trim();
            if endpoint.is_empty() {
                return Err(ConfigError::Empty { var: ENDPOINT_VAR });
            }
            config.endpoint = endpoint.to_string();
        }

        if let Some(value) = lookup(PAGE_SIZE_VAR) {
            config.grid.page_size = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidPageSize { var: PAGE_SIZE_VAR, value })?;
        }

        if let Some(value) = lookup(DELETE_MODE_VAR) {
            config.grid.delete_mode = DeleteMode::parse(&value)
                .ok_or(ConfigError::InvalidDeleteMode { var: DELETE_MODE_VAR, value })?;
        }

        if let Some(dir) = lookup(LOG_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }

        if let Some(filter) = lookup(LOG_FILTER_VAR).filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GridConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.grid, GridOptions::default());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_overrides() {
        let config = GridConfig::from_lookup(lookup(&[
            (ENDPOINT_VAR, "http://example.test/people"),
            (PAGE_SIZE_VAR, "25"),
            (DELETE_MODE_VAR, "Remove"),
            (LOG_DIR_VAR, "/var/log/grid"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "http://example.test/people");
        assert_eq!(config.grid.page_size, 25);
        assert_eq!(config.grid.delete_mode, DeleteMode::Remove);
        assert_eq!(config.log_dir, PathBuf::from("/var/log/grid"));
    }

    #[test]
    fn test_invalid_page_size() {
        let err = GridConfig::from_lookup(lookup(&[(PAGE_SIZE_VAR, "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPageSize { var: PAGE_SIZE_VAR, value: "0".to_string() }
        );
    }

    #[test]
    fn test_invalid_delete_mode() {
        let err = GridConfig::from_lookup(lookup(&[(DELETE_MODE_VAR, "purge")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDeleteMode { .. }));
    }

    #[test]
    fn test_empty_endpoint() {
        let err = GridConfig::from_lookup(lookup(&[(ENDPOINT_VAR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Empty { var: ENDPOINT_VAR });
    }
}
