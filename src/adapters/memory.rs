use crate::domain::ports::Table;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Table kept entirely in memory, for embedding the pipeline in other programs.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    rows: Vec<Vec<String>>,
}

impl MemoryTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn from_rows(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

#[async_trait]
impl Table for MemoryTable {
    async fn read_all_rows(&self) -> Result<Vec<Vec<String>>> {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        Ok(self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.resize(width, String::new());
                row
            })
            .collect())
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
        Ok(())
    }
}
