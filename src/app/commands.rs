use crate::adapters::{ArchiveDocumentStore, CsvTable, LocalDocumentStore};
use crate::config::toml_config::delimiter_for_path;
use crate::core::engine::QuoteEngine;
use crate::core::grouping::{group_flat_rows, grouped_table};
use crate::domain::model::BatchSummary;
use crate::domain::ports::{BatchLog, ConfigProvider, Table};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Document mode over the configured table.
pub async fn generate_documents<C: ConfigProvider, L: BatchLog>(
    config: &C,
    log: L,
) -> Result<BatchSummary> {
    let mut table = CsvTable::open(config).await?;
    let engine = QuoteEngine::new(log);

    match config.archive_name() {
        Some(archive) => {
            let path = Path::new(config.documents_dir()).join(archive);
            tracing::info!("📦 Documents will be archived in: {}", path.display());
            engine
                .generate_documents(&mut table, ArchiveDocumentStore::new(path))
                .await
        }
        None => {
            tracing::info!("📁 Documents will be written to: {}", config.documents_dir());
            engine
                .generate_documents(&mut table, LocalDocumentStore::new(config.documents_dir()))
                .await
        }
    }
}

/// Column mode over the configured table; the table is saved when the batch ends.
pub async fn inject_summary_column<C: ConfigProvider, L: BatchLog>(
    config: &C,
    log: L,
) -> Result<BatchSummary> {
    let mut table = CsvTable::open(config).await?;
    let engine = QuoteEngine::new(log);

    let summary = engine
        .inject_summary_column(&mut table, config.summary_header(), config.bullet())
        .await?;

    if let Some(destination) = table.destination() {
        tracing::info!("📁 Table saved to: {}", destination.display());
    }
    Ok(summary)
}

/// Groups a flat sheet into the quote table layout and writes it to `output`.
pub async fn group_quotes<C: ConfigProvider>(config: &C, output: &str) -> Result<(PathBuf, usize)> {
    let source = CsvTable::open(config).await?;
    let quotes = group_flat_rows(source.read_all_rows().await?)?;

    let table = CsvTable::from_rows(grouped_table(&quotes)?, delimiter_for_path(output))
        .with_destination(output);
    let path = table.save()?;

    Ok((path, quotes.len()))
}
