//! Runtime configuration read from the environment.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::search::SearchStrategy;
use crate::util::normalize_text_option;

const DEFAULT_LIST_LIMIT: usize = 20;
const MAX_LIST_LIMIT: usize = 1_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings shared by Luno front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunoConfig {
    /// `LUNO_DB_PATH`; front ends fall back to a platform data directory
    pub db_path: Option<PathBuf>,
    /// `LUNO_SEARCH_STRATEGY`: `memory` (default) or `pushdown`
    pub search_strategy: SearchStrategy,
    /// `LUNO_LIST_LIMIT`: default page size, in `[1, 1000]`
    pub list_limit: usize,
}

impl Default for LunoConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            search_strategy: SearchStrategy::default(),
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl LunoConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let db_path = normalize_text_option(lookup("LUNO_DB_PATH")).map(PathBuf::from);

        let search_strategy = match normalize_text_option(lookup("LUNO_SEARCH_STRATEGY")) {
            Some(value) => value
                .parse::<SearchStrategy>()
                .map_err(|error| ConfigError::Invalid(format!("LUNO_SEARCH_STRATEGY: {error}")))?,
            None => SearchStrategy::default(),
        };

        let list_limit = match normalize_text_option(lookup("LUNO_LIST_LIMIT")) {
            Some(value) => value.parse::<usize>().map_err(|_| {
                ConfigError::Invalid(format!(
                    "LUNO_LIST_LIMIT must be an integer in [1, {MAX_LIST_LIMIT}]"
                ))
            })?,
            None => DEFAULT_LIST_LIMIT,
        };
        if !(1..=MAX_LIST_LIMIT).contains(&list_limit) {
            return Err(ConfigError::Invalid(format!(
                "LUNO_LIST_LIMIT must be in [1, {MAX_LIST_LIMIT}]"
            )));
        }

        Ok(Self {
            db_path,
            search_strategy,
            list_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<LunoConfig, ConfigError> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        LunoConfig::from_lookup(|key| map.get(key).map(|value| (*value).to_string()))
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]).unwrap(), LunoConfig::default());
    }

    #[test]
    fn reads_all_values() {
        let config = config_from(&[
            ("LUNO_DB_PATH", " /tmp/luno.db "),
            ("LUNO_SEARCH_STRATEGY", "pushdown"),
            ("LUNO_LIST_LIMIT", "50"),
        ])
        .unwrap();

        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/luno.db")));
        assert_eq!(config.search_strategy, SearchStrategy::Pushdown);
        assert_eq!(config.list_limit, 50);
    }

    #[test]
    fn rejects_unknown_strategy() {
        let error = config_from(&[("LUNO_SEARCH_STRATEGY", "fuzzy")]).unwrap_err();
        assert!(error.to_string().contains("LUNO_SEARCH_STRATEGY"));
    }

    #[test]
    fn rejects_out_of_range_limit() {
        assert!(config_from(&[("LUNO_LIST_LIMIT", "0")]).is_err());
        assert!(config_from(&[("LUNO_LIST_LIMIT", "5000")]).is_err());
        assert!(config_from(&[("LUNO_LIST_LIMIT", "many")]).is_err());
    }
}
