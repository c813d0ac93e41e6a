//! `problem-set.toml` loading.
//!
//! ```toml
//! shuffle = true
//!
//! [query]
//! rivals = ["otera", "suisen"]
//! year_min = 2010
//!
//! [quota]
//! "300" = 1
//! "1200+" = 0
//! ```
//!
//! Every key is optional. Without a `[quota]` table the standard set is drawn.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::query::Query;
use crate::sampler::Quota;

pub const DEFAULT_CONFIG_FILE: &str = "problem-set.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub shuffle: bool,
    pub query: Query,
    pub quota: Quota,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shuffle: true,
            query: Query::default(),
            quota: Quota::standard(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {}", path.display());
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads `path` if given, else the default file when it exists, else
    /// the built-in defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_should_use_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.query.diff_min, 100);
        assert_eq!(config.quota.total(), 14);
    }

    #[test]
    fn config_should_parse_query_and_quota() {
        let config = Config::from_toml(
            r#"
            shuffle = false

            [query]
            rivals = ["otera", "kencho"]
            year_min = 2010
            year_max = "2018"
            include_regional = false

            [quota]
            "600" = 2
            "?" = 0
            "300" = 1
            "1200+" = 1
            "#,
        )
        .unwrap();

        assert!(!config.shuffle);
        assert_eq!(config.query.rivals, ["otera", "kencho"]);
        assert_eq!(config.query.year_min, "2010");
        assert_eq!(config.query.year_max, "2018");
        assert_eq!(config.query.diff_max, 1200);
        assert!(!config.query.include_regional);
        assert!(config.query.include_jag_other);

        let quota: Vec<_> = config.quota.iter().collect();
        assert_eq!(quota, [("?", 0), ("300", 1), ("600", 2), ("1200+", 1)]);
    }

    #[test]
    fn bad_config_should_fail() {
        let err = Config::from_toml("[quota]\n\"300\" = -1\n").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));

        let err = Config::load("no/such/problem-set.toml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
