pub mod column;
pub mod document;
pub mod engine;
pub mod grouping;
pub mod parser;
pub mod processor;
pub mod reader;

pub use crate::domain::model::{QuoteRecord, RowFields, ServiceLineItem};
pub use crate::domain::ports::{BatchLog, ConfigProvider, DocumentHandle, DocumentStore, Table};
pub use crate::utils::error::Result;
