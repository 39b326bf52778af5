use crate::core::column::ColumnRenderer;
use crate::core::processor::{ColumnOutput, DocumentOutput, RowProcessor};
use crate::domain::model::BatchSummary;
use crate::domain::ports::{BatchLog, DocumentStore, Table};
use crate::utils::error::Result;

/// The two batch entry points over a quote table.
pub struct QuoteEngine<L: BatchLog> {
    processor: RowProcessor<L>,
}

impl<L: BatchLog> QuoteEngine<L> {
    pub fn new(log: L) -> Self {
        Self {
            processor: RowProcessor::new(log),
        }
    }

    /// Creates one document per quote row whose services parse.
    pub async fn generate_documents<T: Table, D: DocumentStore>(
        &self,
        table: &mut T,
        store: D,
    ) -> Result<BatchSummary> {
        tracing::info!("Generating quote documents");
        let mut output = DocumentOutput::new(store);
        self.processor.run(table, &mut output).await
    }

    /// Writes a services summary next to each quote row whose services parse.
    pub async fn inject_summary_column<T: Table>(
        &self,
        table: &mut T,
        header: &str,
        bullet: &str,
    ) -> Result<BatchSummary> {
        tracing::info!(header, "Injecting services summary column");
        let mut output = ColumnOutput::new(ColumnRenderer::new(bullet), header);
        self.processor.run(table, &mut output).await
    }

    pub fn log(&self) -> &L {
        self.processor.log()
    }
}
