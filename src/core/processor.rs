use crate::core::column::ColumnRenderer;
use crate::core::document::DocumentRenderer;
use crate::core::parser::ServicePayloadParser;
use crate::core::reader::{RecordReader, SheetLayout};
use crate::domain::model::{
    columns, BatchSummary, Emission, QuoteRecord, RowFields, RowId, RowMode, RowOutcome, ServiceLineItem,
};
use crate::domain::ports::{BatchLog, DocumentHandle, DocumentStore, Table};
use crate::utils::error::{DocgenError, Result};
use async_trait::async_trait;

/// A row that parsed cleanly and is ready to be written out.
pub struct EmitContext<'a> {
    pub row: &'a RowId,
    /// 0-based grid row, header row included.
    pub table_row: usize,
    pub record: &'a QuoteRecord,
    pub items: &'a [ServiceLineItem],
}

/// How parsed rows are rendered and where the result goes.
#[async_trait]
pub trait OutputStrategy: Send {
    fn mode(&self) -> RowMode;

    async fn begin(&mut self, _layout: &SheetLayout, _table: &mut dyn Table) -> Result<()> {
        Ok(())
    }

    async fn emit(&mut self, ctx: EmitContext<'_>, table: &mut dyn Table) -> Result<Emission>;

    async fn finish(&mut self, _table: &mut dyn Table) -> Result<()> {
        Ok(())
    }
}

/// One new document per quote.
pub struct DocumentOutput<D: DocumentStore> {
    store: D,
}

impl<D: DocumentStore> DocumentOutput<D> {
    pub fn new(store: D) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<D: DocumentStore> OutputStrategy for DocumentOutput<D> {
    fn mode(&self) -> RowMode {
        RowMode::Document
    }

    async fn emit(&mut self, ctx: EmitContext<'_>, _table: &mut dyn Table) -> Result<Emission> {
        let rendered = DocumentRenderer::render(ctx.record, ctx.items);
        tracing::debug!(row = %ctx.row, title = %rendered.title, "Creating document");

        let mut document = self.store.create_document(&rendered.title).await?;
        for block in &rendered.blocks {
            document.append_text_block(block).await?;
        }

        Ok(Emission::Document {
            locator: document.locator(),
        })
    }

    async fn finish(&mut self, _table: &mut dyn Table) -> Result<()> {
        self.store.finish().await
    }
}

/// Services summary written into one column to the right of the data.
pub struct ColumnOutput {
    renderer: ColumnRenderer,
    header: String,
    target: Option<usize>,
}

impl ColumnOutput {
    pub fn new(renderer: ColumnRenderer, header: impl Into<String>) -> Self {
        Self {
            renderer,
            header: header.into(),
            target: None,
        }
    }

    pub fn target_column(&self) -> Option<usize> {
        self.target
    }
}

#[async_trait]
impl OutputStrategy for ColumnOutput {
    fn mode(&self) -> RowMode {
        RowMode::Column
    }

    async fn begin(&mut self, layout: &SheetLayout, table: &mut dyn Table) -> Result<()> {
        // An earlier run's summary sits in the last column; input columns are never targets.
        let width = layout.width();
        let is_input_label = columns::ALL.contains(&self.header.as_str());
        let target = match layout.column_of(&self.header) {
            Some(column) if column + 1 == width && !is_input_label => column,
            _ => width,
        };
        tracing::debug!(column = target, header = %self.header, "Summary column selected");

        table.write_cell(0, target, &self.header).await?;
        self.target = Some(target);
        Ok(())
    }

    async fn emit(&mut self, ctx: EmitContext<'_>, table: &mut dyn Table) -> Result<Emission> {
        let column = match self.target {
            Some(column) => column,
            None => {
                return Err(DocgenError::ProcessingError {
                    message: "summary column written before the header row was inspected"
                        .to_string(),
                })
            }
        };

        let summary = self.renderer.render(ctx.items);
        table.write_cell(ctx.table_row, column, &summary).await?;

        Ok(Emission::Cell {
            row: ctx.table_row,
            column,
        })
    }

    async fn finish(&mut self, table: &mut dyn Table) -> Result<()> {
        table.flush().await
    }
}

/// Drives each row through parse, render and emit; a row that fails to parse
/// is logged and skipped without touching any output.
pub struct RowProcessor<L: BatchLog> {
    log: L,
}

impl<L: BatchLog> RowProcessor<L> {
    pub fn new(log: L) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub async fn process_row<S: OutputStrategy>(
        &self,
        fields: &RowFields,
        strategy: &mut S,
        table: &mut dyn Table,
    ) -> Result<RowOutcome> {
        let row = RowId::of(fields);
        let record = QuoteRecord::from_fields(fields);

        match ServicePayloadParser::parse(&row, &record.services_raw) {
            Ok(items) => {
                tracing::debug!(row = %row, services = items.len(), "Rendering quote");
                let ctx = EmitContext {
                    row: &row,
                    table_row: fields.index + 1,
                    record: &record,
                    items: &items,
                };
                let emission = strategy.emit(ctx, table).await?;
                Ok(RowOutcome::Emitted(emission))
            }
            Err(failure) => Ok(RowOutcome::Skipped(failure)),
        }
    }

    /// Reads the whole table once and processes every data row in order.
    pub async fn run<T: Table, S: OutputStrategy>(
        &self,
        table: &mut T,
        strategy: &mut S,
    ) -> Result<BatchSummary> {
        let block = table.read_all_rows().await?;
        let reader = RecordReader::new(block)?;
        let layout = SheetLayout::inspect(reader.headers())?;

        tracing::info!(mode = %strategy.mode(), rows = reader.size_hint().0, "Starting batch");
        strategy.begin(&layout, &mut *table).await?;

        let mut summary = BatchSummary::default();
        for fields in reader {
            summary.rows += 1;

            match self.process_row(&fields, strategy, &mut *table).await? {
                RowOutcome::Emitted(Emission::Document { locator }) => {
                    summary.emitted += 1;
                    self.log.log_line(&format!("Created document: {}", locator));
                }
                RowOutcome::Emitted(Emission::Cell { row, column }) => {
                    summary.emitted += 1;
                    tracing::debug!(row, column, "Summary cell written");
                }
                RowOutcome::Skipped(failure) => {
                    summary.skipped += 1;
                    self.log.log_line(&failure.to_string());
                }
            }
        }

        strategy.finish(&mut *table).await?;

        tracing::info!(
            mode = %strategy.mode(),
            rows = summary.rows,
            emitted = summary.emitted,
            skipped = summary.skipped,
            "Batch finished"
        );
        Ok(summary)
    }
}
