pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{Cli, Command};
pub use config::TomlConfig;

pub use adapters::{ArchiveDocumentStore, CsvTable, LocalDocumentStore, MemoryLog, MemoryTable, TracingLog};
pub use core::engine::QuoteEngine;
pub use domain::model::{BatchSummary, QuoteRecord, RowMode, ServiceLineItem};
pub use utils::error::{DocgenError, Result};
