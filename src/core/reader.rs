use crate::domain::model::{columns, RowFields};
use crate::utils::error::{DocgenError, Result};
use std::collections::{HashMap, HashSet};

/// Walks a header row plus data rows, yielding each data row keyed by header label.
///
/// Consumes the block it is built from, so it can be iterated once.
pub struct RecordReader {
    headers: Vec<String>,
    rows: std::iter::Enumerate<std::vec::IntoIter<Vec<String>>>,
}

impl RecordReader {
    pub fn new(block: Vec<Vec<String>>) -> Result<Self> {
        let mut rows = block.into_iter();
        let headers = rows
            .next()
            .ok_or(DocgenError::EmptyTableError)?
            .into_iter()
            .map(|label| label.trim().to_string())
            .collect();

        Ok(Self {
            headers,
            rows: rows.enumerate(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for RecordReader {
    type Item = RowFields;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, cells) = self.rows.next()?;
        let mut values = HashMap::with_capacity(self.headers.len());

        for (column, header) in self.headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = cells.get(column).cloned().unwrap_or_default();
            // First occurrence of a repeated label wins.
            values.entry(header.clone()).or_insert(value);
        }

        Some(RowFields { index, values })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

/// What the header row looks like compared to the quote table's fixed columns.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    headers: Vec<String>,
    missing: Vec<&'static str>,
    unexpected: Vec<String>,
    duplicates: Vec<String>,
}

impl SheetLayout {
    /// Rejects a header row without `Quote ID` or `Services`; other gaps are warned about.
    pub fn inspect(headers: &[String]) -> Result<Self> {
        let present: HashSet<&str> = headers.iter().map(String::as_str).collect();

        if let Some(column) = columns::REQUIRED.iter().find(|c| !present.contains(*c)) {
            return Err(DocgenError::MissingColumnError {
                column: column.to_string(),
            });
        }

        let missing: Vec<&'static str> = columns::ALL
            .iter()
            .copied()
            .filter(|c| !present.contains(c))
            .collect();

        let unexpected: Vec<String> = headers
            .iter()
            .filter(|h| !h.is_empty() && !columns::ALL.contains(&h.as_str()))
            .cloned()
            .collect();

        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for header in headers.iter().filter(|h| !h.is_empty()) {
            if !seen.insert(header.as_str()) && !duplicates.contains(header) {
                duplicates.push(header.clone());
            }
        }

        for column in &missing {
            tracing::warn!(column, "Column missing from header row, rendering it as empty text");
        }
        for header in &duplicates {
            tracing::warn!(header = %header, "Header label repeated, using its first column");
        }
        if !unexpected.is_empty() {
            tracing::debug!(columns = ?unexpected, "Ignoring columns outside the quote layout");
        }

        Ok(Self {
            headers: headers.to_vec(),
            missing,
            unexpected,
            duplicates,
        })
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn column_of(&self, label: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == label)
    }

    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    pub fn unexpected(&self) -> &[String] {
        &self.unexpected
    }

    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_reader_maps_cells_to_headers_in_row_order() {
        let reader = RecordReader::new(block(&[
            &["Quote ID", "Services", "Notes"],
            &["Q1", "[]", "first"],
            &["Q2", "[]", "second"],
        ]))
        .unwrap();

        let rows: Vec<RowFields> = reader.collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[0].get("Quote ID"), Some("Q1"));
        assert_eq!(rows[1].get("Notes"), Some("second"));
        assert_eq!(rows[1].table_row_number(), 3);
    }

    #[test]
    fn test_reader_pads_short_rows_and_trims_headers() {
        let mut reader =
            RecordReader::new(block(&[&[" Quote ID ", "Services", "Notes"], &["Q1"]])).unwrap();

        assert_eq!(reader.headers(), &["Quote ID", "Services", "Notes"]);
        let row = reader.next().unwrap();
        assert_eq!(row.get("Quote ID"), Some("Q1"));
        assert_eq!(row.get("Notes"), Some(""));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_reader_keeps_first_of_duplicate_headers() {
        let mut reader =
            RecordReader::new(block(&[&["Notes", "Notes"], &["kept", "dropped"]])).unwrap();
        assert_eq!(reader.next().unwrap().get("Notes"), Some("kept"));
    }

    #[test]
    fn test_reader_rejects_empty_block() {
        assert!(matches!(
            RecordReader::new(Vec::new()),
            Err(DocgenError::EmptyTableError)
        ));
    }

    #[test]
    fn test_header_only_block_yields_nothing() {
        let reader = RecordReader::new(block(&[&["Quote ID", "Services"]])).unwrap();
        assert_eq!(reader.count(), 0);
    }

    #[test]
    fn test_layout_requires_services_column() {
        let headers = vec!["Quote ID".to_string(), "Notes".to_string()];
        match SheetLayout::inspect(&headers) {
            Err(DocgenError::MissingColumnError { column }) => assert_eq!(column, "Services"),
            other => panic!("expected missing column error, got {:?}", other),
        }
    }

    #[test]
    fn test_layout_reports_gaps_and_extras() {
        let headers: Vec<String> = ["Quote ID", "Services", "Status", "Status", "Notes"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let layout = SheetLayout::inspect(&headers).unwrap();

        assert_eq!(layout.width(), 5);
        assert_eq!(layout.column_of("Notes"), Some(4));
        assert!(layout.missing().contains(&"Email"));
        assert!(!layout.missing().contains(&"Notes"));
        assert_eq!(layout.unexpected(), &["Status", "Status"]);
        assert_eq!(layout.duplicates(), &["Status"]);
    }
}
