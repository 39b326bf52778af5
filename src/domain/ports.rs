use crate::utils::error::Result;
use async_trait::async_trait;

/// Tabular source the quotes are read from and, in column mode, written back to.
#[async_trait]
pub trait Table: Send + Sync {
    /// Header row first; rows are padded to the header width.
    async fn read_all_rows(&self) -> Result<Vec<Vec<String>>>;

    /// 0-based coordinates, header row included. Grows the grid when needed.
    async fn write_cell(&mut self, row: usize, column: usize, value: &str) -> Result<()>;

    /// Persist writes made so far.
    async fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    type Handle: DocumentHandle;

    async fn create_document(&mut self, title: &str) -> Result<Self::Handle>;

    /// Called once after the last document of a batch.
    async fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
pub trait DocumentHandle: Send + Sync {
    async fn append_text_block(&mut self, text: &str) -> Result<()>;

    /// Where the document can be found (path, URL, archive entry).
    fn locator(&self) -> String;
}

pub trait BatchLog: Send + Sync {
    fn log_line(&self, line: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn source_path(&self) -> Option<&str>;
    fn source_url(&self) -> Option<&str>;
    fn delimiter(&self) -> u8;
    fn documents_dir(&self) -> &str;
    fn archive_name(&self) -> Option<&str>;
    fn summary_header(&self) -> &str;
    fn bullet(&self) -> &str;
    fn table_output(&self) -> Option<&str>;
}
