use crate::domain::ports::BatchLog;
use std::sync::{Arc, Mutex};

/// Sends batch log lines to the `quote_docgen::batch` tracing target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl BatchLog for TracingLog {
    fn log_line(&self, line: &str) {
        tracing::info!(target: "quote_docgen::batch", "{}", line);
    }
}

/// Keeps batch log lines in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl BatchLog for MemoryLog {
    fn log_line(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}
