pub mod catalog;
pub mod catalog_map;
pub mod engine;
pub mod transactions;

pub use crate::domain::model::{Report, Transaction};
pub use crate::domain::ports::{FilterProvider, LineSource, Pipeline, ReportSink};
pub use crate::utils::error::Result;
