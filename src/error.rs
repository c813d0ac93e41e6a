use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no year (2xxx) found in source `{source_str}`")]
    MissingYear { source_str: String },
    #[error("solved count `{value}` is not a number")]
    InvalidSolvedCount { value: String },
    #[error("tier `{tier}` has {available} problems but {requested} were requested")]
    InsufficientPopulation {
        tier: String,
        requested: usize,
        available: usize,
    },
    #[error("invalid query url: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("failed to read config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Render(#[from] askama::Error),
}
