pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod generator;
pub mod parser;
pub mod problem;
pub mod query;
pub mod render;
pub mod sampler;

pub use error::{Error, Result};
