#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, JobCommand, MovieFilterArgs};
pub use toml_config::{MovieFilter, MovieFilterConfig};
