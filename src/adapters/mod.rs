// Adapters layer: concrete tables, document stores and log sinks behind the domain ports.

pub mod csv_table;
pub mod documents;
pub mod log;
pub mod memory;

pub use csv_table::CsvTable;
pub use documents::{ArchiveDocumentStore, LocalDocumentStore};
pub use log::{MemoryLog, TracingLog};
pub use memory::MemoryTable;
