pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::toml_config::{MovieFilter, MovieFilterConfig};

pub use core::catalog::{CatalogPipeline, CatalogReducer};
pub use core::catalog_map::{CatalogMapper, MovieMapPipeline};
pub use core::engine::JobEngine;
pub use core::transactions::{TransactionPipeline, TransactionReducer};
pub use utils::error::{JobError, Result};
