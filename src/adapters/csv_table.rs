use crate::domain::ports::{ConfigProvider, Table};
use crate::utils::error::{DocgenError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Quote table held in memory, loaded from CSV and written back as CSV.
#[derive(Debug, Clone)]
pub struct CsvTable {
    rows: Vec<Vec<String>>,
    delimiter: u8,
    destination: Option<PathBuf>,
    dirty: bool,
}

impl CsvTable {
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        // Spreadsheet exports often start with a byte order mark.
        if let Some(first) = rows.first_mut().and_then(|row| row.first_mut()) {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }

        tracing::debug!(rows = rows.len(), "Loaded CSV table");
        Ok(Self {
            rows,
            delimiter,
            destination: None,
            dirty: false,
        })
    }

    /// Loads a local file; flushing writes back to the same file unless redirected.
    pub fn from_path<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let file = fs::File::open(path.as_ref())?;
        let table = Self::from_reader(file, delimiter)?;
        Ok(table.with_destination(path.as_ref()))
    }

    /// Downloads a CSV export; there is no destination until one is set.
    pub async fn fetch(client: &Client, url: &str, delimiter: u8) -> Result<Self> {
        tracing::debug!("Fetching quote table from: {}", url);
        let response = client.get(url).send().await?.error_for_status()?;
        tracing::debug!("Table response status: {}", response.status());

        let body = response.bytes().await?;
        Self::from_reader(body.as_ref(), delimiter)
    }

    /// Opens the table named by the configuration, honouring its output override.
    pub async fn open<C: ConfigProvider>(config: &C) -> Result<Self> {
        let table = match (config.source_path(), config.source_url()) {
            (Some(path), _) => Self::from_path(path, config.delimiter())?,
            (None, Some(url)) => Self::fetch(&Client::new(), url, config.delimiter()).await?,
            (None, None) => {
                return Err(DocgenError::MissingConfigError {
                    field: "source.path or source.url".to_string(),
                })
            }
        };

        Ok(match config.table_output() {
            Some(output) => table.with_destination(output),
            None => table,
        })
    }

    pub fn from_rows(rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            rows,
            delimiter,
            destination: None,
            dirty: false,
        }
    }

    pub fn with_destination<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.destination = Some(path.into());
        self
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn rectangular(&self) -> Vec<Vec<String>> {
        let width = self.width();
        self.rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.resize(width, String::new());
                row
            })
            .collect()
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());
        for row in self.rectangular() {
            writer.write_record(&row)?;
        }
        writer
            .into_inner()
            .map_err(|e| DocgenError::IoError(e.into_error()))
    }

    /// Writes the table to its destination regardless of pending changes.
    pub fn save(&self) -> Result<PathBuf> {
        let destination = self
            .destination
            .clone()
            .ok_or_else(|| DocgenError::MissingConfigError {
                field: "column.output_path".to_string(),
            })?;

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&destination, self.to_csv_bytes()?)?;

        tracing::debug!("Table written to: {}", destination.display());
        Ok(destination)
    }
}

#[async_trait]
impl Table for CsvTable {
    async fn read_all_rows(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.rectangular())
    }

    async fn write_cell(&mut self, row: usize, column: usize, value: &str) -> Result<()> {
        if row >= self.rows.len() {
            self.rows.resize(row + 1, Vec::new());
        }
        let cells = &mut self.rows[row];
        if column >= cells.len() {
            cells.resize(column + 1, String::new());
        }
        cells[column] = value.to_string();
        self.dirty = true;
        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.save()?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_quoted_json_and_pads_rows() {
        let csv = "\u{feff}Quote ID,Services,Notes\nQ1,\"[{\"\"Service_Type\"\":\"\"Translation\"\"}]\",hi\nQ2,[]\n";
        let table = CsvTable::from_reader(csv.as_bytes(), b',').unwrap();

        let rows = table.read_all_rows().await.unwrap();
        assert_eq!(rows[0], vec!["Quote ID", "Services", "Notes"]);
        assert_eq!(rows[1][1], r#"[{"Service_Type":"Translation"}]"#);
        assert_eq!(rows[2], vec!["Q2", "[]", ""]);
    }

    #[tokio::test]
    async fn test_write_cell_grows_and_flushes_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quotes.csv");
        fs::write(&path, "Quote ID,Services\nQ1,[]\n").unwrap();

        let mut table = CsvTable::from_path(&path, b',').unwrap();
        table.write_cell(0, 2, "Summary").await.unwrap();
        table.write_cell(1, 2, "• line\ndetails").await.unwrap();
        table.flush().await.unwrap();

        let reloaded = CsvTable::from_path(&path, b',').unwrap();
        assert_eq!(reloaded.rows()[0], vec!["Quote ID", "Services", "Summary"]);
        assert_eq!(reloaded.rows()[1][2], "• line\ndetails");
    }

    #[tokio::test]
    async fn test_flush_without_changes_does_not_need_destination() {
        let mut table = CsvTable::from_rows(vec![vec!["Quote ID".to_string()]], b',');
        assert!(table.flush().await.is_ok());

        table.write_cell(0, 1, "x").await.unwrap();
        assert!(matches!(
            table.flush().await,
            Err(DocgenError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_tab_delimited() {
        let table = CsvTable::from_reader("Quote ID\tServices\nQ1\t[]\n".as_bytes(), b'\t').unwrap();
        assert_eq!(table.rows()[1], vec!["Q1", "[]"]);
    }
}
